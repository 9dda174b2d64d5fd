//! CoinGecko REST client.
//!
//! Endpoints used:
//! - `/simple/price` - current USD price for all tracked assets in one call
//! - `/coins/{id}/market_chart` - historical `[epochMillis, price]` series for one asset

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{COINGECKO, CoinGeckoApiConfig};
use crate::data::error::FetchError;
use crate::data::source::{PricePoint, PriceSource};
use crate::domain::{Asset, PerAsset};

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Option<Vec<(f64, f64)>>,
}

/// Parse a `/simple/price` body. Every tracked asset must be present with a `usd` price.
pub fn parse_simple_price(body: &str) -> Result<PerAsset<f64>, FetchError> {
    let quotes: HashMap<String, UsdQuote> = serde_json::from_str(body)?;

    PerAsset::try_from_fn(|asset| {
        let quote = quotes
            .get(asset.provider_id())
            .ok_or_else(|| FetchError::missing_field(format!("asset '{}'", asset.provider_id())))?;
        quote
            .usd
            .ok_or_else(|| FetchError::missing_field(format!("'{}.usd'", asset.provider_id())))
    })
}

/// Parse a `/coins/{id}/market_chart` body into ordered price points.
pub fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, FetchError> {
    let chart: MarketChartResponse = serde_json::from_str(body)?;
    let prices = chart
        .prices
        .ok_or_else(|| FetchError::missing_field("'prices'"))?;

    Ok(prices
        .into_iter()
        .map(|(timestamp_ms, price)| PricePoint {
            timestamp_ms: timestamp_ms as i64,
            price,
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(config: CoinGeckoApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(COINGECKO.client.user_agent)
            .build()
            .context("Failed to build CoinGecko HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /simple/price?ids={ids}&vs_currencies=usd
    pub fn simple_price_url(&self) -> String {
        format!(
            "{}{}?ids={}&vs_currencies={}",
            self.base_url,
            COINGECKO.rest.simple_price_path,
            Asset::provider_ids_csv(),
            COINGECKO.rest.vs_currency
        )
    }

    /// GET /coins/{id}/market_chart?vs_currency=usd&days={days}
    pub fn market_chart_url(&self, asset: Asset, days: u32) -> String {
        format!(
            "{}{}?vs_currency={}&days={}",
            self.base_url,
            COINGECKO
                .rest
                .market_chart_path
                .replace("{id}", asset.provider_id()),
            COINGECKO.rest.vs_currency,
            days
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn spot_prices(&self) -> Result<PerAsset<f64>, FetchError> {
        let body = self.get_text(&self.simple_price_url()).await?;
        parse_simple_price(&body)
    }

    async fn market_chart(&self, asset: Asset, days: u32) -> Result<Vec<PricePoint>, FetchError> {
        let body = self.get_text(&self.market_chart_url(asset, days)).await?;
        parse_market_chart(&body)
    }
}
