use eframe::egui::{Frame, Grid, Margin, RichText, ScrollArea, Ui};
use strum::IntoEnumIterator;

use crate::domain::{Asset, Mode};
use crate::engine::SeriesStore;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::section_heading;

/// Row-per-label comparison table: label column plus one USD price column per asset.
pub fn show_comparison_table(ui: &mut Ui, store: &SeriesStore, mode: Mode) {
    let (heading, first_column) = if mode.is_live() {
        (UI_TEXT.table_heading_live, UI_TEXT.table_time_column)
    } else {
        (UI_TEXT.table_heading_historical, UI_TEXT.table_date_column)
    };

    ui.vertical_centered(|ui| {
        section_heading(ui, heading);

        Frame::new()
            .fill(UI_CONFIG.colors.table_fill)
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .max_height(UI_CONFIG.table_max_height)
                    .id_salt("comparison_table")
                    .show(ui, |ui| {
                        Grid::new("comparison_grid")
                            .num_columns(1 + Asset::iter().count())
                            .striped(true)
                            .spacing([24.0, 6.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new(first_column).strong());
                                for asset in Asset::iter() {
                                    ui.label(
                                        RichText::new(format!(
                                            "{}{}",
                                            asset.symbol(),
                                            UI_TEXT.table_price_suffix
                                        ))
                                        .strong(),
                                    );
                                }
                                ui.end_row();

                                for (label, prices) in store.rows() {
                                    ui.label(label);
                                    for (_, price) in prices {
                                        ui.monospace(format!("${}", price));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    });
}
