//! Turns raw provider numbers into the display strings the store holds.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SERIES;
use crate::data::error::FetchError;
use crate::data::source::PricePoint;
use crate::domain::{Asset, LabelStyle, PerAsset};
use crate::utils::time_utils::epoch_ms_to_local_label;

/// One live poll, ready to append.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSample {
    pub label: String,
    pub prices: PerAsset<String>,
}

/// One historical window, ready to replace the store wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSnapshot {
    pub labels: Vec<String>,
    pub prices: PerAsset<Vec<String>>,
}

impl HistoricalSnapshot {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Format a price with exactly two fraction digits, rounding half away from zero
/// on the decimal value the provider sent (`400.005` -> `"400.01"`).
///
/// Goes through the shortest round-trip text of the float so binary
/// representation error can't flip a midpoint.
pub fn format_price_2dp(price: f64) -> Result<String, FetchError> {
    if !price.is_finite() {
        return Err(FetchError::ResponseShape(format!("non-finite price {}", price)));
    }
    let mut decimal = Decimal::from_str(&price.to_string())
        .map_err(|e| FetchError::ResponseShape(format!("price {} out of range: {}", price, e)))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    decimal.rescale(2);
    Ok(decimal.to_string())
}

pub fn normalize_live(prices: PerAsset<f64>, label: String) -> Result<LiveSample, FetchError> {
    Ok(LiveSample {
        label,
        prices: PerAsset::try_from_fn(|asset| format_price_2dp(prices[asset]))?,
    })
}

/// Validate that all three series line up, then build labels from the BTC
/// timestamps and format every price.
pub fn normalize_historical(
    series: PerAsset<Vec<PricePoint>>,
    style: LabelStyle,
) -> Result<HistoricalSnapshot, FetchError> {
    check_alignment(&series, SERIES.max_timestamp_skew_ms)?;

    let labels = series
        .btc
        .iter()
        .map(|point| {
            epoch_ms_to_local_label(point.timestamp_ms, style).ok_or_else(|| {
                FetchError::ResponseShape(format!("invalid timestamp {}", point.timestamp_ms))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let prices = PerAsset::try_from_fn(|asset| {
        series[asset]
            .iter()
            .map(|point| format_price_2dp(point.price))
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(HistoricalSnapshot { labels, prices })
}

/// Every asset must have as many points as BTC, stamped within `max_skew_ms`
/// of the BTC point at the same index.
pub fn check_alignment(
    series: &PerAsset<Vec<PricePoint>>,
    max_skew_ms: i64,
) -> Result<(), FetchError> {
    let reference = &series.btc;

    for (asset, points) in series.iter().filter(|(asset, _)| *asset != Asset::Btc) {
        if points.len() != reference.len() {
            return Err(FetchError::Misaligned {
                asset,
                detail: format!("{} points vs {}", points.len(), reference.len()),
            });
        }

        let drift = reference
            .iter()
            .zip(points)
            .enumerate()
            .map(|(index, (a, b))| (index, a.timestamp_ms.abs_diff(b.timestamp_ms)))
            .find(|(_, skew)| *skew > max_skew_ms.unsigned_abs());

        if let Some((index, skew)) = drift {
            return Err(FetchError::Misaligned {
                asset,
                detail: format!("index {} stamped {}ms apart", index, skew),
            });
        }
    }
    Ok(())
}
