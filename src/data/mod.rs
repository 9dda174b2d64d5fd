// Provider access and response normalization
pub mod coingecko;
pub mod error;
pub mod normalize;
pub mod source;

// Re-export commonly used types
pub use coingecko::CoinGeckoClient;
pub use error::FetchError;
pub use normalize::{HistoricalSnapshot, LiveSample};
pub use source::{PricePoint, PriceSource};
