#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;
use eframe::NativeOptions;
use eframe::egui::ViewportBuilder;

use crypto_pulse::{Cli, build_engine, build_runtime, run_app};

fn main() -> eframe::Result {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Runtime + engine. The runtime is held here until the window closes.
    let rt = match build_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    };
    let engine = match build_engine(&args, rt.handle().clone()) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "🚀 CryptoPulse starting in {} mode ({} view)",
        args.mode,
        args.view
    );

    // D. Run Native App
    let options = NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([1100.0, 820.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "CryptoPulse",
        options,
        Box::new(move |cc| Ok(run_app(cc, engine))),
    );

    rt.shutdown_background();
    result
}
