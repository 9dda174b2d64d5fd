//! CoinGecko-specific configuration constants and types.

/// Configuration for the CoinGecko REST client
/// (This is the runtime struct handed to `CoinGeckoClient`)
#[derive(Debug, Clone)]
pub struct CoinGeckoApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for CoinGeckoApiConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO.rest.base_url.to_string(),
            timeout_ms: COINGECKO.client.timeout_ms,
        }
    }
}

/// REST endpoints and query constants
pub struct RestEndpoints {
    /// Public (free tier) API root
    pub base_url: &'static str,
    /// Spot price for a batch of ids
    pub simple_price_path: &'static str,
    /// Per-coin historical series. `{id}` is substituted with the provider id.
    pub market_chart_path: &'static str,
    /// Quote currency for every query
    pub vs_currency: &'static str,
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

/// The Master Configuration Struct
pub struct CoinGeckoConfig {
    pub rest: RestEndpoints,
    pub client: ClientDefaults,
}

pub const COINGECKO: CoinGeckoConfig = CoinGeckoConfig {
    rest: RestEndpoints {
        base_url: "https://api.coingecko.com/api/v3",
        simple_price_path: "/simple/price",
        market_chart_path: "/coins/{id}/market_chart",
        vs_currency: "usd",
    },
    client: ClientDefaults {
        timeout_ms: 10_000,
        user_agent: concat!("crypto-pulse/", env!("CARGO_PKG_VERSION")),
    },
};
