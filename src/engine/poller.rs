use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::source::PriceSource;
use crate::domain::Mode;

use super::fetch::spawn_fetch;
use super::messages::{FetchResult, FetchTicket};

/// The recurring live poll as a single owned task.
///
/// The first tick fires immediately, then every `period`. Each tick spawns its
/// own fetch so a slow request never holds up the timer. Dropping the poller
/// aborts the timer task; fetches already in flight carry their generation and
/// are filtered by the engine.
pub struct LivePoller {
    handle: JoinHandle<()>,
    generation: u64,
}

impl LivePoller {
    pub fn start(
        runtime: &Handle,
        source: Arc<dyn PriceSource>,
        generation: u64,
        period: Duration,
        tx: Sender<FetchResult>,
    ) -> Self {
        let task_runtime = runtime.clone();

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut seq = 0;
            loop {
                ticker.tick().await;
                seq += 1;

                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_fetch_events {
                    log::info!("[poller] generation {} tick #{}", generation, seq);
                }

                let ticket = FetchTicket {
                    generation,
                    mode: Mode::Live,
                    seq,
                };
                spawn_fetch(&task_runtime, source.clone(), ticket, tx.clone());
            }
        });

        Self { handle, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for LivePoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::channel;

    use async_trait::async_trait;

    use crate::data::error::FetchError;
    use crate::data::source::PricePoint;
    use crate::domain::{Asset, PerAsset};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceSource for CountingSource {
        async fn spot_prices(&self) -> Result<PerAsset<f64>, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(PerAsset::new(n as f64, 0.0, 0.0))
        }

        async fn market_chart(&self, _: Asset, _: u32) -> Result<Vec<PricePoint>, FetchError> {
            Err(FetchError::Network("not scripted".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_immediately_then_every_period() {
        let source = Arc::new(CountingSource::default());
        let (tx, rx) = channel();

        let poller = LivePoller::start(
            &Handle::current(),
            source.clone(),
            7,
            Duration::from_secs(30),
            tx,
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert!(poller.is_running());

        let tickets: Vec<FetchTicket> = rx.try_iter().map(|r| r.ticket).collect();
        assert_eq!(tickets.iter().map(|t| t.seq).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(tickets.iter().all(|t| t.generation == 7 && t.mode == Mode::Live));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_stops_the_timer() {
        let source = Arc::new(CountingSource::default());
        let (tx, _rx) = channel();

        let poller = LivePoller::start(
            &Handle::current(),
            source.clone(),
            1,
            Duration::from_secs(30),
            tx,
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(poller);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
