//! Plot visualization configuration

use eframe::egui::Color32;

use crate::domain::{Asset, PerAsset};

pub struct PlotConfig {
    /// Line colour per asset
    pub series_colors: PerAsset<Color32>,
    /// Width of each price line
    pub series_line_width: f32,
    /// Plot aspect ratio (width:height)
    pub plot_aspect_ratio: f32,
    /// Upper bound on x-axis labels drawn before thinning kicks in
    pub max_x_labels: usize,
}

impl PlotConfig {
    pub fn color_for(&self, asset: Asset) -> Color32 {
        self.series_colors[asset]
    }
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    series_colors: PerAsset {
        btc: Color32::WHITE,
        eth: Color32::YELLOW,
        bnb: Color32::from_rgb(0x39, 0xFF, 0x14), // Neon green
    },
    series_line_width: 2.0,
    plot_aspect_ratio: 2.0,
    max_x_labels: 12,
};
