//! Configuration module for the crypto pulse application.

pub mod coingecko;

mod debug; // Private because of the public re-export. Forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;
pub mod series;

// Re-export commonly used items
pub use coingecko::{COINGECKO, CoinGeckoApiConfig};
pub use series::SERIES;
