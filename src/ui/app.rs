use std::time::Duration;

use eframe::{Frame, egui};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::engine::PulseEngine;
use crate::ui::config::UI_CONFIG;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

/// The eframe shell around the engine. Holds no price data of its own:
/// every frame renders straight from `engine.store()`.
pub struct CryptoPulseApp {
    pub(super) engine: PulseEngine,
    pub(super) plot_view: PlotView,
}

impl CryptoPulseApp {
    pub fn new(cc: &eframe::CreationContext, mut engine: PulseEngine) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        engine.start();

        Self {
            engine,
            plot_view: PlotView::new(),
        }
    }
}

impl eframe::App for CryptoPulseApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.engine.shutdown();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Apply any finished fetches before drawing
        if self.engine.update() {
            ctx.request_repaint();
        }

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        // Keep waking up so results land even when the user is idle
        ctx.request_repaint_after(Duration::from_millis(UI_CONFIG.repaint_interval_ms));
    }
}
