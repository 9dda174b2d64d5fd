use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Instant;

use futures::future::try_join3;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::data::error::FetchError;
use crate::data::normalize::{
    HistoricalSnapshot, LiveSample, normalize_historical, normalize_live,
};
use crate::data::source::PriceSource;
use crate::domain::{Asset, LabelStyle, PerAsset};
use crate::utils::time_utils::local_now_label;

use super::messages::{FetchPayload, FetchResult, FetchTicket};

/// One spot price request for all assets, labelled with the local time it came back.
pub async fn fetch_live(source: &dyn PriceSource) -> Result<LiveSample, FetchError> {
    let prices = source.spot_prices().await?;
    normalize_live(prices, local_now_label())
}

/// Three market chart requests in flight together. The first failure fails the lot,
/// so a half-populated window never reaches the store.
pub async fn fetch_historical(
    source: &dyn PriceSource,
    days: u32,
    style: LabelStyle,
) -> Result<HistoricalSnapshot, FetchError> {
    let (btc, eth, bnb) = try_join3(
        source.market_chart(Asset::Btc, days),
        source.market_chart(Asset::Eth, days),
        source.market_chart(Asset::Bnb, days),
    )
    .await?;

    normalize_historical(PerAsset::new(btc, eth, bnb), style)
}

/// Run whichever fetch the ticket's mode calls for and wrap the outcome.
pub async fn run_fetch(source: Arc<dyn PriceSource>, ticket: FetchTicket) -> FetchResult {
    let start = Instant::now();

    let result = match ticket.mode.window_days() {
        None => fetch_live(source.as_ref()).await.map(FetchPayload::Live),
        Some(days) => fetch_historical(source.as_ref(), days, ticket.mode.label_style())
            .await
            .map(FetchPayload::Historical),
    };

    FetchResult {
        ticket,
        duration_ms: start.elapsed().as_millis(),
        result,
    }
}

/// Fire and forget. The result goes down `tx`; nothing here waits on it.
pub fn spawn_fetch(
    runtime: &Handle,
    source: Arc<dyn PriceSource>,
    ticket: FetchTicket,
    tx: Sender<FetchResult>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        let result = run_fetch(source, ticket).await;
        // If the receiver is dead, we ignore the error (engine shutting down).
        let _ = tx.send(result);
    })
}
