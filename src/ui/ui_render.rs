use eframe::egui::{CentralPanel, Color32, Context, Frame, Margin, RichText, TopBottomPanel};
use strum::IntoEnumIterator;

use crate::domain::{Asset, Mode, View};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{ModePanel, Panel, ViewPanel};
use crate::ui::ui_table_view::show_comparison_table;

use super::app::CryptoPulseApp;

impl CryptoPulseApp {
    pub(super) fn render_top_panel(&mut self, ctx: &Context) {
        let top_frame = Frame::new()
            .fill(UI_CONFIG.colors.background)
            .inner_margin(Margin::symmetric(12, 10));
        TopBottomPanel::top("controls_panel")
            .frame(top_frame)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(UI_TEXT.app_title).size(28.0).strong());
                    ui.label(self.subtitle());
                    ui.add_space(10.0);

                    let mode_events = ModePanel::new(self.engine.mode()).render(ui);
                    ui.add_space(6.0);
                    let view_events = ViewPanel::new(self.engine.view()).render(ui);

                    for mode in mode_events {
                        self.engine.set_mode(mode);
                    }
                    for view in view_events {
                        self.engine.set_view(view);
                    }
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_frame = Frame::new()
            .fill(UI_CONFIG.colors.background)
            .inner_margin(Margin::symmetric(16, 8));
        CentralPanel::default()
            .frame(central_frame)
            .show(ctx, |ui| {
                let store = self.engine.store();

                if store.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        if self.engine.last_error().is_none() {
                            ui.spinner();
                            ui.add_space(12.0);
                        }
                        ui.heading(UI_TEXT.waiting_for_data);
                        ui.add_space(6.0);
                        ui.label(
                            RichText::new(UI_TEXT.waiting_helper).color(Color32::from_gray(190)),
                        );
                    });
                    return;
                }

                match self.engine.view() {
                    View::Graph => self.plot_view.show_price_chart(ui, store),
                    View::Comparison => show_comparison_table(ui, store, self.engine.mode()),
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.table_header)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // 1. Fetch strategy
                    if self.engine.is_polling() {
                        ui.metric("📡", UI_TEXT.status_polling, Color32::from_rgb(100, 200, 100));
                    } else {
                        ui.metric("🗄", UI_TEXT.status_snapshot, UI_CONFIG.colors.mode_selected);
                    }
                    ui.separator();

                    // 2. Freshness
                    let store = self.engine.store();
                    ui.metric(UI_TEXT.status_rows, &store.len().to_string(), Color32::WHITE);
                    if let Some(age) = self.engine.last_update_age() {
                        ui.metric(
                            UI_TEXT.status_last_update,
                            &format!("{}s ago", age.as_secs()),
                            Color32::WHITE,
                        );
                    }
                    for asset in Asset::iter() {
                        if let Some(price) = store.latest(asset) {
                            ui.metric(asset.symbol(), &format!("${}", price), Color32::LIGHT_GRAY);
                        }
                    }

                    // 3. Problems
                    if self.engine.stale_discards() > 0 {
                        ui.separator();
                        ui.metric(
                            UI_TEXT.status_discarded,
                            &self.engine.stale_discards().to_string(),
                            Color32::GRAY,
                        );
                    }
                    if let Some(error) = self.engine.last_error() {
                        ui.separator();
                        ui.label_error(format!("⚠ {}", error));
                    }
                });
            });
    }

    fn subtitle(&self) -> String {
        match self.engine.mode() {
            Mode::Live => UI_TEXT
                .live_subtitle
                .replace("{secs}", &self.engine.poll_interval().as_secs().to_string()),
            windowed => format!(
                "{}{})",
                UI_TEXT.historical_subtitle_prefix,
                windowed.span_text()
            ),
        }
    }
}
