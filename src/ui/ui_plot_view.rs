use std::sync::Arc;

use eframe::egui::Ui;
use egui_plot::{AxisHints, Corner, GridMark, HPlacement, Legend, Line, Plot, PlotPoints};
use strum::IntoEnumIterator;

use crate::config::plot::PLOT_CONFIG;
use crate::domain::Asset;
use crate::engine::SeriesStore;
use crate::ui::ui_text::UI_TEXT;

/// Three price lines plotted against the shared label index.
#[derive(Default)]
pub struct PlotView;

impl PlotView {
    pub fn new() -> Self {
        Self
    }

    pub fn show_price_chart(&mut self, ui: &mut Ui, store: &SeriesStore) {
        let labels: Arc<Vec<String>> = Arc::new(store.labels().to_vec());
        let axis_labels = labels.clone();
        let hover_labels = labels.clone();
        let label_count = labels.len();

        Plot::new("price_chart")
            .view_aspect(PLOT_CONFIG.plot_aspect_ratio)
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![create_x_axis(axis_labels)])
            .custom_y_axes(vec![create_y_axis()])
            .x_grid_spacer(move |input| label_grid_marks(input.bounds, label_count))
            .label_formatter(move |name, value| {
                let label = label_at(&hover_labels, value.x).unwrap_or_default();
                if name.is_empty() {
                    label.to_string()
                } else {
                    format!("{}\n{}\n${:.2}", name, label, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for asset in Asset::iter() {
                    plot_ui.line(
                        Line::new(asset.display_name(), series_points(store, asset))
                            .color(PLOT_CONFIG.color_for(asset))
                            .width(PLOT_CONFIG.series_line_width),
                    );
                }
            });
    }
}

/// `[index, price]` pairs. Samples that do not parse are skipped rather than plotted at zero.
fn series_points(store: &SeriesStore, asset: Asset) -> PlotPoints<'static> {
    store
        .series(asset)
        .iter()
        .enumerate()
        .filter_map(|(i, sample)| sample.parse::<f64>().ok().map(|price| [i as f64, price]))
        .collect::<Vec<_>>()
        .into()
}

/// The label sitting at plot x position `x`, if `x` is on (or rounds to) a sample.
fn label_at(labels: &[String], x: f64) -> Option<&str> {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 0.25 {
        return None;
    }
    labels.get(index as usize).map(String::as_str)
}

/// One mark per sample, thinned out so at most `PLOT_CONFIG.max_x_labels` are drawn.
fn label_grid_marks(bounds: (f64, f64), label_count: usize) -> Vec<GridMark> {
    if label_count == 0 {
        return Vec::new();
    }
    let (min, max) = bounds;
    let first = min.ceil().max(0.0) as usize;
    let last = (max.floor().max(0.0) as usize).min(label_count - 1);
    if first > last {
        return Vec::new();
    }

    let visible = last - first + 1;
    let step = visible.div_ceil(PLOT_CONFIG.max_x_labels).max(1);

    (first..=last)
        .step_by(step)
        .map(|i| GridMark {
            value: i as f64,
            step_size: step as f64,
        })
        .collect()
}

fn create_x_axis(labels: Arc<Vec<String>>) -> AxisHints<'static> {
    AxisHints::new_x().formatter(move |grid_mark, _range| {
        label_at(&labels, grid_mark.value)
            .unwrap_or_default()
            .to_string()
    })
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_y_axis)
        .formatter(|grid_mark, _range| format!("${:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}
