use async_trait::async_trait;

use crate::data::error::FetchError;
use crate::domain::{Asset, PerAsset};

/// One provider sample: epoch milliseconds and the raw price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Where prices come from. The engine only talks to this trait, so tests can
/// plug in scripted sources instead of the network.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current USD price for every tracked asset, in a single request.
    async fn spot_prices(&self) -> Result<PerAsset<f64>, FetchError>;

    /// Ordered historical points for one asset over the last `days` days.
    async fn market_chart(&self, asset: Asset, days: u32) -> Result<Vec<PricePoint>, FetchError>;
}
