#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::{Builder, Handle, Runtime};

// Re-export commonly used types
pub use data::{CoinGeckoClient, FetchError, PriceSource};
pub use domain::{Asset, Mode, PerAsset, View};
pub use engine::{PulseEngine, SeriesStore};
pub use ui::CryptoPulseApp;

use config::{COINGECKO, CoinGeckoApiConfig, SERIES};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Mode to open in: live polling or a 30/180/365 day window
    #[arg(long, value_enum, default_value_t = Mode::Live)]
    pub mode: Mode,

    /// Initial presentation
    #[arg(long, value_enum, default_value_t = View::Graph)]
    pub view: View,

    /// Root of the CoinGecko v3 API
    #[arg(long, default_value_t = COINGECKO.rest.base_url.to_string())]
    pub api_base_url: String,

    /// Seconds between live polls
    #[arg(long, default_value_t = SERIES.live_poll_interval_secs, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_secs: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = COINGECKO.client.timeout_ms)]
    pub timeout_ms: u64,
}

/// Multi-threaded runtime the fetch tasks run on. Must outlive the GUI loop.
pub fn build_runtime() -> anyhow::Result<Runtime> {
    Builder::new_multi_thread()
        .enable_all()
        .thread_name("pulse-fetch")
        .build()
        .context("Failed to create Tokio runtime")
}

/// Wire the CoinGecko client into a fresh engine. Nothing is fetched yet.
pub fn build_engine(args: &Cli, runtime: Handle) -> anyhow::Result<PulseEngine> {
    let client = CoinGeckoClient::new(CoinGeckoApiConfig {
        base_url: args.api_base_url.clone(),
        timeout_ms: args.timeout_ms,
    })
    .with_context(|| format!("Failed to set up price source at {}", args.api_base_url))?;

    Ok(PulseEngine::new(
        Arc::new(client),
        runtime,
        args.mode,
        args.view,
        Duration::from_secs(args.poll_secs),
    ))
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, engine: PulseEngine) -> Box<dyn eframe::App> {
    Box::new(CryptoPulseApp::new(cc, engine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_live_graph() {
        let args = Cli::try_parse_from(["crypto-pulse"]).unwrap();
        assert_eq!(args.mode, Mode::Live);
        assert_eq!(args.view, View::Graph);
        assert_eq!(args.poll_secs, 30);
        assert_eq!(args.api_base_url, "https://api.coingecko.com/api/v3");
    }

    #[test]
    fn window_and_view_flags_parse() {
        let args =
            Cli::try_parse_from(["crypto-pulse", "--mode", "365", "--view", "comparison"]).unwrap();
        assert_eq!(args.mode, Mode::Window365d);
        assert_eq!(args.view, View::Comparison);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(Cli::try_parse_from(["crypto-pulse", "--poll-secs", "0"]).is_err());
    }

    #[test]
    fn engine_builds_idle() {
        let runtime = build_runtime().unwrap();
        let args = Cli::try_parse_from(["crypto-pulse", "--mode", "30"]).unwrap();
        let engine = build_engine(&args, runtime.handle().clone()).unwrap();

        assert_eq!(engine.mode(), Mode::Window30d);
        assert!(engine.store().is_empty());
        assert!(!engine.is_polling());
    }
}
