use eframe::egui::{Color32, Ui};
use strum::IntoEnumIterator;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Mode, View};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::selector_button;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

fn mode_button_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Live => UI_TEXT.mode_live,
        Mode::Window30d => UI_TEXT.mode_month,
        Mode::Window180d => UI_TEXT.mode_half_year,
        Mode::Window365d => UI_TEXT.mode_year,
    }
}

fn view_button_text(view: View) -> &'static str {
    match view {
        View::Graph => UI_TEXT.view_graph,
        View::Comparison => UI_TEXT.view_comparison,
    }
}

/// The four mode buttons
pub struct ModePanel {
    selected: Mode,
}

impl ModePanel {
    pub fn new(selected: Mode) -> Self {
        Self { selected }
    }
}

impl Panel for ModePanel {
    type Event = Mode;

    fn render(&mut self, ui: &mut Ui) -> Vec<Mode> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            for mode in Mode::iter() {
                let clicked = selector_button(
                    ui,
                    mode_button_text(mode),
                    mode == self.selected,
                    UI_CONFIG.colors.mode_selected,
                    Color32::BLACK,
                )
                .clicked();

                if clicked {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Mode button clicked: {}", mode);
                    }
                    events.push(mode);
                }
            }
        });
        events
    }
}

/// Graph / Comparison toggle
pub struct ViewPanel {
    selected: View,
}

impl ViewPanel {
    pub fn new(selected: View) -> Self {
        Self { selected }
    }
}

impl Panel for ViewPanel {
    type Event = View;

    fn render(&mut self, ui: &mut Ui) -> Vec<View> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            for view in View::iter() {
                let clicked = selector_button(
                    ui,
                    view_button_text(view),
                    view == self.selected,
                    UI_CONFIG.colors.view_selected,
                    Color32::WHITE,
                )
                .clicked();

                if clicked && view != self.selected {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("View switched to {}", view);
                    }
                    self.selected = view;
                    events.push(view);
                }
            }
        });
        events
    }
}
