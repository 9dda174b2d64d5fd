use eframe::egui::{Button, Color32, Context, Response, RichText, Ui, Visuals};

use crate::ui::config::UI_CONFIG;

/// Creates a colored heading using the configured heading color
pub fn colored_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into())
        .color(UI_CONFIG.colors.heading)
        .strong()
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    // Customize the dark theme
    visuals.window_fill = UI_CONFIG.colors.background;
    visuals.panel_fill = UI_CONFIG.colors.background;
    visuals.extreme_bg_color = UI_CONFIG.colors.table_fill;
    visuals.faint_bg_color = UI_CONFIG.colors.table_header;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;

    // Set the custom visuals
    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// A toggle-style button: filled with `selected_fill` when active, grey otherwise.
pub fn selector_button(
    ui: &mut Ui,
    text: &str,
    selected: bool,
    selected_fill: Color32,
    selected_text: Color32,
) -> Response {
    let (fill, text_color) = if selected {
        (selected_fill, selected_text)
    } else {
        (UI_CONFIG.colors.button_idle, Color32::WHITE)
    };
    ui.add(
        Button::new(RichText::new(text).color(text_color).strong())
            .fill(fill)
            .corner_radius(5.0),
    )
}
