use std::fmt;
use std::ops::{Index, IndexMut};

use strum::IntoEnumIterator;

/// The fixed set of tracked assets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum_macros::EnumIter)]
pub enum Asset {
    Btc,
    Eth,
    Bnb,
}

impl Asset {
    /// Stable key used throughout the app (table headers, logs).
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Bnb => "BNB",
        }
    }

    // The id we pass into the CoinGecko API (not the display name)
    pub fn provider_id(&self) -> &'static str {
        match self {
            Asset::Btc => "bitcoin",
            Asset::Eth => "ethereum",
            Asset::Bnb => "binancecoin",
        }
    }

    /// Legend text for the chart
    pub fn display_name(&self) -> &'static str {
        match self {
            Asset::Btc => "Bitcoin (BTC)",
            Asset::Eth => "Ethereum (ETH)",
            Asset::Bnb => "BNB (BNB)",
        }
    }

    /// Comma separated provider ids, in enum order. Used for the batch spot price query.
    pub fn provider_ids_csv() -> String {
        Self::iter()
            .map(|asset| asset.provider_id())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One value per tracked asset.
///
/// Keeps the three series side by side so code that touches one asset has to
/// touch all of them (there is no way to build a `PerAsset` with a hole in it).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerAsset<T> {
    pub btc: T,
    pub eth: T,
    pub bnb: T,
}

impl<T> PerAsset<T> {
    pub fn new(btc: T, eth: T, bnb: T) -> Self {
        Self { btc, eth, bnb }
    }

    /// Build by calling `f` once per asset, in enum order.
    pub fn from_fn(mut f: impl FnMut(Asset) -> T) -> Self {
        Self {
            btc: f(Asset::Btc),
            eth: f(Asset::Eth),
            bnb: f(Asset::Bnb),
        }
    }

    /// Fallible version of `from_fn`. Stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(Asset) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            btc: f(Asset::Btc)?,
            eth: f(Asset::Eth)?,
            bnb: f(Asset::Bnb)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Asset, &T)> {
        [
            (Asset::Btc, &self.btc),
            (Asset::Eth, &self.eth),
            (Asset::Bnb, &self.bnb),
        ]
        .into_iter()
    }
}

impl<T> Index<Asset> for PerAsset<T> {
    type Output = T;

    fn index(&self, asset: Asset) -> &T {
        match asset {
            Asset::Btc => &self.btc,
            Asset::Eth => &self.eth,
            Asset::Bnb => &self.bnb,
        }
    }
}

impl<T> IndexMut<Asset> for PerAsset<T> {
    fn index_mut(&mut self, asset: Asset) -> &mut T {
        match asset {
            Asset::Btc => &mut self.btc,
            Asset::Eth => &mut self.eth,
            Asset::Bnb => &mut self.bnb,
        }
    }
}

impl<T> IntoIterator for PerAsset<T> {
    type Item = (Asset, T);
    type IntoIter = std::array::IntoIter<(Asset, T), 3>;

    fn into_iter(self) -> Self::IntoIter {
        [
            (Asset::Btc, self.btc),
            (Asset::Eth, self.eth),
            (Asset::Bnb, self.bnb),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_and_provider_ids_are_distinct() {
        let symbols: Vec<_> = Asset::iter().map(|asset| asset.symbol()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "BNB"]);
        assert_eq!(Asset::Bnb.provider_id(), "binancecoin");
        assert_eq!(Asset::Eth.to_string(), "ETH");
    }

    #[test]
    fn batch_query_ids_follow_enum_order() {
        assert_eq!(Asset::provider_ids_csv(), "bitcoin,ethereum,binancecoin");
    }

    #[test]
    fn try_from_fn_short_circuits_on_error() {
        let mut visited = Vec::new();
        let result: Result<PerAsset<u8>, Asset> = PerAsset::try_from_fn(|asset| {
            visited.push(asset);
            if asset == Asset::Eth { Err(asset) } else { Ok(1) }
        });

        assert_eq!(result, Err(Asset::Eth));
        assert_eq!(visited, vec![Asset::Btc, Asset::Eth]);
    }

    #[test]
    fn index_matches_fields() {
        let mut values = PerAsset::new(1, 2, 3);
        values[Asset::Bnb] = 30;
        assert_eq!(values[Asset::Btc], 1);
        assert_eq!(values[Asset::Eth], 2);
        assert_eq!(values.bnb, 30);
    }
}
