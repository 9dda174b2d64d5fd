use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub background: Color32,
    pub table_fill: Color32,
    pub table_header: Color32,
    pub mode_selected: Color32,
    pub view_selected: Color32,
    pub button_idle: Color32,
    pub error: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Idle repaint cadence so finished fetches show up without user input
    pub repaint_interval_ms: u64,
    pub table_max_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::WHITE,
        heading: Color32::WHITE,
        background: Color32::from_rgb(0x05, 0x27, 0x37),
        table_fill: Color32::from_rgb(0x0D, 0x3B, 0x4C),
        table_header: Color32::from_rgb(0x13, 0x3B, 0x5C),
        mode_selected: Color32::from_rgb(0xFF, 0xD7, 0x00), // Gold
        view_selected: Color32::from_rgb(0x4C, 0xAF, 0x50), // Green
        button_idle: Color32::from_rgb(0x44, 0x44, 0x44),
        error: Color32::from_rgb(255, 100, 100),
    },
    repaint_interval_ms: 500,
    table_max_height: 520.0,
};
