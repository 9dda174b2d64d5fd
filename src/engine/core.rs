use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::SERIES;
use crate::data::error::FetchError;
use crate::data::source::PriceSource;
use crate::domain::{Mode, View};

use super::fetch::spawn_fetch;
use super::messages::{FetchPayload, FetchResult, FetchTicket};
use super::poller::LivePoller;
use super::state::SeriesStore;

/// Owns the mode, the view and the series store, and is the only thing that
/// mutates the store.
///
/// Fetches run on the tokio runtime and report back over a channel. `update()`
/// is called once per frame from the UI thread and applies whatever has
/// arrived, so all store mutation happens on one thread.
pub struct PulseEngine {
    /// What the presentation layer reads every frame
    store: SeriesStore,

    mode: Mode,
    view: View,

    /// Bumped on every mode transition. Results stamped with an older value are dropped.
    generation: u64,
    /// Has the startup mode's transition run yet?
    started: bool,
    /// Present only while in live mode
    poller: Option<LivePoller>,
    /// Highest live seq applied in the current generation
    last_live_seq: u64,

    source: Arc<dyn PriceSource>,
    runtime: Handle,
    poll_interval: Duration,

    /// Worker Communication
    result_tx: Sender<FetchResult>,
    result_rx: Receiver<FetchResult>,

    /// Telemetry for the status bar
    last_error: Option<FetchError>,
    last_applied_at: Option<Instant>,
    stale_discards: u64,
}

impl PulseEngine {
    /// Build the engine. Nothing is fetched until `start()` (or the first `set_mode`).
    pub fn new(
        source: Arc<dyn PriceSource>,
        runtime: Handle,
        initial_mode: Mode,
        initial_view: View,
        poll_interval: Duration,
    ) -> Self {
        let (result_tx, result_rx) = channel::<FetchResult>();

        Self {
            store: SeriesStore::new(),
            mode: initial_mode,
            view: initial_view,
            generation: 0,
            started: false,
            poller: None,
            last_live_seq: 0,
            source,
            runtime,
            poll_interval,
            result_tx,
            result_rx,
            last_error: None,
            last_applied_at: None,
            stale_discards: 0,
        }
    }

    /// Run the transition for the startup mode. Safe to call more than once.
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            self.enter_mode();
        }
    }

    /// Switch modes. Re-selecting the active mode does nothing, so repeated
    /// clicks never stack timers or duplicate historical requests.
    pub fn set_mode(&mut self, new_mode: Mode) {
        if self.started && new_mode == self.mode {
            return;
        }
        log::info!("Mode change: {} -> {}", self.mode, new_mode);

        self.mode = new_mode;
        self.started = true;
        self.enter_mode();
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Stop the live timer. In-flight requests are left to finish and get filtered.
    pub fn shutdown(&mut self) {
        self.cancel_poller();
        self.generation += 1;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Engine shut down at generation {}", self.generation);
        }
    }

    /// THE GAME LOOP.
    /// Applies every result that has arrived since the last call.
    /// Returns TRUE if the store changed (the UI should redraw).
    pub fn update(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.result_rx.try_recv() {
            changed |= self.handle_fetch_result(result);
        }
        changed
    }

    // --- ACCESSORS FOR UI ---

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(LivePoller::is_running)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn last_update_age(&self) -> Option<Duration> {
        self.last_applied_at.map(|at| at.elapsed())
    }

    pub fn stale_discards(&self) -> u64 {
        self.stale_discards
    }

    // --- INTERNAL LOGIC ---

    /// The transition effect. Runs exactly once per mode change.
    fn enter_mode(&mut self) {
        // Cancel before anything new is scheduled: at most one timer ever exists.
        self.cancel_poller();
        self.generation += 1;
        self.last_live_seq = 0;

        match self.mode.window_days() {
            None => {
                self.poller = Some(LivePoller::start(
                    &self.runtime,
                    self.source.clone(),
                    self.generation,
                    self.poll_interval,
                    self.result_tx.clone(),
                ));
            }
            Some(days) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_fetch_events {
                    log::info!(
                        "Historical fetch issued: {} days (generation {})",
                        days,
                        self.generation
                    );
                }
                #[cfg(not(debug_assertions))]
                let _ = days;

                let ticket = FetchTicket {
                    generation: self.generation,
                    mode: self.mode,
                    seq: 0,
                };
                spawn_fetch(
                    &self.runtime,
                    self.source.clone(),
                    ticket,
                    self.result_tx.clone(),
                );
            }
        }
    }

    fn cancel_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_fetch_events {
                log::info!("Live poller cancelled (generation {})", poller.generation());
            }
            drop(poller);
        }
    }

    /// Returns TRUE if the store was mutated.
    fn handle_fetch_result(&mut self, fetch: FetchResult) -> bool {
        let FetchResult {
            ticket,
            duration_ms,
            result,
        } = fetch;

        if ticket.generation != self.generation {
            self.discard_stale(&ticket, "issued under an earlier mode");
            return false;
        }

        match result {
            Err(e) => {
                log::error!(
                    "{} fetch failed (mode {}, generation {}) [{}]: {}",
                    fetch_kind(ticket.mode),
                    ticket.mode,
                    ticket.generation,
                    e.kind(),
                    e
                );
                self.last_error = Some(e);
                false
            }
            Ok(FetchPayload::Live(sample)) => {
                if ticket.seq <= self.last_live_seq {
                    self.discard_stale(&ticket, "overtaken by a newer live poll");
                    return false;
                }
                self.last_live_seq = ticket.seq;
                self.store
                    .append_with_eviction(sample, SERIES.live_capacity);
                self.mark_applied(&ticket, duration_ms);
                true
            }
            Ok(FetchPayload::Historical(snapshot)) => match self.store.replace_all(snapshot) {
                Ok(()) => {
                    self.mark_applied(&ticket, duration_ms);
                    true
                }
                Err(e) => {
                    log::error!(
                        "historical snapshot rejected (mode {}, generation {}): {}",
                        ticket.mode,
                        ticket.generation,
                        e
                    );
                    self.last_error = Some(e);
                    false
                }
            },
        }
    }

    fn mark_applied(&mut self, ticket: &FetchTicket, duration_ms: u128) {
        self.last_error = None;
        self.last_applied_at = Some(Instant::now());

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!(
                "{} fetch applied in {}ms: {} rows (mode {}, seq {})",
                fetch_kind(ticket.mode),
                duration_ms,
                self.store.len(),
                ticket.mode,
                ticket.seq
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = (ticket, duration_ms);
    }

    fn discard_stale(&mut self, ticket: &FetchTicket, reason: &str) {
        self.stale_discards += 1;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_stale_discards {
            log::info!(
                "Discarded {} result (mode {}, generation {}, seq {}): {}",
                fetch_kind(ticket.mode),
                ticket.mode,
                ticket.generation,
                ticket.seq,
                reason
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = (ticket, reason);
    }
}

impl Drop for PulseEngine {
    fn drop(&mut self) {
        self.cancel_poller();
    }
}

fn fetch_kind(mode: Mode) -> &'static str {
    if mode.is_live() { "live" } else { "historical" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use crate::data::normalize::LiveSample;
    use crate::data::source::PricePoint;
    use crate::domain::{Asset, PerAsset};
    use crate::utils::TimeUtils;

    const POLL: Duration = Duration::from_secs(30);

    /// In-memory price source. Spot prices count up with each call
    /// (`btc = n`, `eth = 10n`, `bnb = 100n`) unless a scripted answer is queued.
    #[derive(Default)]
    struct ScriptedSource {
        spot_calls: AtomicUsize,
        spot_script: Mutex<Vec<Result<PerAsset<f64>, FetchError>>>,
        chart_calls: AtomicUsize,
        charts: Mutex<HashMap<Asset, Result<Vec<PricePoint>, FetchError>>>,
        /// When set, market chart calls wait for a permit before answering
        chart_gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedSource {
        fn with_charts(points: usize) -> Self {
            let source = Self::default();
            for asset in [Asset::Btc, Asset::Eth, Asset::Bnb] {
                source
                    .charts
                    .lock()
                    .unwrap()
                    .insert(asset, Ok(daily_points(points, asset)));
            }
            source
        }

        fn gated(mut self, gate: Arc<Semaphore>) -> Self {
            self.chart_gate = Some(gate);
            self
        }

        fn spot_calls(&self) -> usize {
            self.spot_calls.load(Ordering::SeqCst)
        }

        fn chart_calls(&self) -> usize {
            self.chart_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn spot_prices(&self) -> Result<PerAsset<f64>, FetchError> {
            let n = self.spot_calls.fetch_add(1, Ordering::SeqCst) + 1;
            let mut script = self.spot_script.lock().unwrap();
            if !script.is_empty() {
                return script.remove(0);
            }
            let n = n as f64;
            Ok(PerAsset::new(n, n * 10.0, n * 100.0))
        }

        async fn market_chart(&self, asset: Asset, _days: u32) -> Result<Vec<PricePoint>, FetchError> {
            self.chart_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.chart_gate {
                let _permit = gate.acquire().await.unwrap();
            }
            self.charts
                .lock()
                .unwrap()
                .get(&asset)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network("not scripted".into())))
        }
    }

    /// `count` daily points at noon UTC, priced per asset so series are distinguishable.
    fn daily_points(count: usize, asset: Asset) -> Vec<PricePoint> {
        let base = match asset {
            Asset::Btc => 60_000.0,
            Asset::Eth => 3_000.0,
            Asset::Bnb => 500.0,
        };
        (0..count)
            .map(|i| PricePoint {
                timestamp_ms: 1_709_985_600_000 + i as i64 * TimeUtils::MS_IN_D,
                price: base + i as f64 * 0.5,
            })
            .collect()
    }

    fn engine(source: Arc<ScriptedSource>, mode: Mode) -> PulseEngine {
        PulseEngine::new(source, Handle::current(), mode, View::Graph, POLL)
    }

    /// Let spawned fetches run to completion without crossing a poll boundary.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    fn assert_aligned(store: &SeriesStore) {
        assert!(store.is_aligned(), "labels and series lengths diverged");
        for asset in [Asset::Btc, Asset::Eth, Asset::Bnb] {
            assert_eq!(store.series(asset).len(), store.len());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn live_fetch_formats_prices_to_two_decimals() {
        let source = Arc::new(ScriptedSource::default());
        source
            .spot_script
            .lock()
            .unwrap()
            .push(Ok(PerAsset::new(50000.1, 3000.0, 400.005)));
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        settle().await;
        assert!(engine.update());

        let store = engine.store();
        assert_eq!(store.series(Asset::Btc), ["50000.10"]);
        assert_eq!(store.series(Asset::Eth), ["3000.00"]);
        assert_eq!(store.series(Asset::Bnb), ["400.01"]);
        assert_eq!(store.labels().len(), 1);
        assert!(!store.labels()[0].is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn eleven_live_polls_keep_the_latest_ten() {
        let source = Arc::new(ScriptedSource::default());
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        // polls at 0s, 30s, ... 300s
        tokio::time::sleep(Duration::from_secs(301)).await;
        engine.update();

        assert_eq!(source.spot_calls(), 11);
        let store = engine.store();
        assert_eq!(store.len(), 10);
        assert_aligned(store);
        let expected: Vec<String> = (2..=11).map(|n| format!("{}.00", n)).collect();
        assert_eq!(store.series(Asset::Btc), expected.as_slice());
        assert_eq!(store.latest(Asset::Bnb), Some("1100.00"));
    }

    #[tokio::test(start_paused = true)]
    async fn switching_to_history_stops_live_mutation() {
        let source = Arc::new(ScriptedSource::with_charts(30));
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        settle().await;
        engine.update();
        assert_eq!(engine.store().len(), 1);
        assert!(engine.is_polling());

        engine.set_mode(Mode::Window30d);
        assert!(!engine.is_polling());
        settle().await;
        engine.update();
        let after_switch = engine.store().clone();
        assert_eq!(after_switch.len(), 30);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!engine.update());
        assert_eq!(source.spot_calls(), 1);
        assert_eq!(engine.store(), &after_switch);
    }

    #[tokio::test(start_paused = true)]
    async fn reselecting_a_mode_is_a_no_op() {
        let source = Arc::new(ScriptedSource::with_charts(5));
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        engine.start();
        engine.set_mode(Mode::Live);
        engine.set_mode(Mode::Live);
        tokio::time::sleep(Duration::from_secs(61)).await;
        // 0s, 30s, 60s from a single timer
        assert_eq!(source.spot_calls(), 3);

        let generation = engine.generation();
        engine.set_mode(Mode::Window180d);
        engine.set_mode(Mode::Window180d);
        settle().await;
        assert_eq!(source.chart_calls(), 3);
        assert_eq!(engine.generation(), generation + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn thirty_day_window_replaces_with_date_labels() {
        let source = Arc::new(ScriptedSource::with_charts(30));
        let mut engine = engine(source.clone(), Mode::Window30d);

        engine.start();
        settle().await;
        assert!(engine.update());

        let store = engine.store();
        assert_eq!(store.len(), 30);
        assert_aligned(store);
        assert!(store.labels().iter().all(|label| label.matches('/').count() == 2));
        assert_eq!(store.series(Asset::Eth).first().map(String::as_str), Some("3000.00"));
        assert_eq!(store.series(Asset::Btc).last().map(String::as_str), Some("60014.50"));
        assert_eq!(source.spot_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failed_history_request_leaves_store_unchanged() {
        let source = Arc::new(ScriptedSource::with_charts(30));
        source
            .charts
            .lock()
            .unwrap()
            .insert(Asset::Eth, Err(FetchError::Status { status: 429, url: "eth".into() }));
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        settle().await;
        engine.update();
        let before = engine.store().clone();
        assert_eq!(before.len(), 1);

        engine.set_mode(Mode::Window365d);
        settle().await;
        assert!(!engine.update());

        assert_eq!(engine.store(), &before);
        assert_eq!(engine.last_error().map(FetchError::kind), Some("status"));
    }

    #[tokio::test(start_paused = true)]
    async fn misaligned_history_is_rejected_whole() {
        let source = Arc::new(ScriptedSource::with_charts(30));
        source
            .charts
            .lock()
            .unwrap()
            .insert(Asset::Bnb, Ok(daily_points(29, Asset::Bnb)));
        let mut engine = engine(source.clone(), Mode::Window30d);

        engine.start();
        settle().await;
        assert!(!engine.update());
        assert!(engine.store().is_empty());
        assert_eq!(engine.last_error().map(FetchError::kind), Some("misaligned"));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_history_is_discarded_after_switch_to_live() {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(ScriptedSource::with_charts(365).gated(gate.clone()));
        let mut engine = engine(source.clone(), Mode::Window365d);

        engine.start();
        settle().await;
        assert_eq!(source.chart_calls(), 3);

        engine.set_mode(Mode::Live);
        settle().await;

        // Release the historical responses only now
        gate.add_permits(3);
        settle().await;
        engine.update();

        let store = engine.store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.series(Asset::Btc), ["1.00"]);
        assert_eq!(engine.stale_discards(), 1);
        assert_eq!(engine.mode(), Mode::Live);
    }

    #[tokio::test(start_paused = true)]
    async fn live_results_arriving_out_of_order_are_dropped() {
        let source = Arc::new(ScriptedSource::default());
        let mut engine = engine(source, Mode::Live);
        engine.start();
        let generation = engine.generation();

        let live = |seq: u64, price: &str| FetchResult {
            ticket: FetchTicket {
                generation,
                mode: Mode::Live,
                seq,
            },
            duration_ms: 0,
            result: Ok(FetchPayload::Live(LiveSample {
                label: format!("t{}", seq),
                prices: PerAsset::new(price.to_string(), price.to_string(), price.to_string()),
            })),
        };

        assert!(engine.handle_fetch_result(live(5, "5.00")));
        assert!(!engine.handle_fetch_result(live(4, "4.00")));
        assert_eq!(engine.store().series(Asset::Eth), ["5.00"]);
        assert_eq!(engine.stale_discards(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_live_poll_keeps_last_good_state_and_retries() {
        let source = Arc::new(ScriptedSource::default());
        {
            let mut script = source.spot_script.lock().unwrap();
            script.push(Ok(PerAsset::new(1.0, 2.0, 3.0)));
            script.push(Err(FetchError::missing_field("asset 'binancecoin'")));
        }
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        tokio::time::sleep(Duration::from_secs(31)).await;
        engine.update();
        assert_eq!(engine.store().len(), 1);
        assert_eq!(engine.last_error().map(FetchError::kind), Some("response-shape"));

        tokio::time::sleep(Duration::from_secs(30)).await;
        engine.update();
        assert_eq!(engine.store().len(), 2);
        assert!(engine.last_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_polling_and_drops_late_results() {
        let source = Arc::new(ScriptedSource::default());
        let mut engine = engine(source.clone(), Mode::Live);

        engine.start();
        settle().await;
        assert_eq!(source.spot_calls(), 1);
        assert!(engine.is_polling());

        // The first poll has landed on the channel but is not applied yet
        engine.shutdown();
        assert!(!engine.is_polling());

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(source.spot_calls(), 1);

        assert!(!engine.update());
        assert!(engine.store().is_empty());
        assert_eq!(engine.stale_discards(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn view_changes_never_fetch() {
        let source = Arc::new(ScriptedSource::with_charts(3));
        let mut engine = engine(source.clone(), Mode::Window30d);

        engine.set_view(View::Comparison);
        settle().await;
        assert_eq!(engine.view(), View::Comparison);
        assert_eq!(source.chart_calls(), 0);
        assert_eq!(source.spot_calls(), 0);
    }
}
