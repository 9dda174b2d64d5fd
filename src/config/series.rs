//! Retention and polling knobs for the series store.

use crate::utils::TimeUtils;

pub struct SeriesConfig {
    /// Rolling window size in live mode. Historical mode ignores this.
    pub live_capacity: usize,
    /// Seconds between live polls
    pub live_poll_interval_secs: u64,
    /// Historical series from different assets may be stamped a little apart
    /// (the final "now" point especially). Beyond this they are treated as misaligned.
    pub max_timestamp_skew_ms: i64,
}

pub const SERIES: SeriesConfig = SeriesConfig {
    live_capacity: 10,
    live_poll_interval_secs: 30,
    max_timestamp_skew_ms: TimeUtils::MS_IN_MIN * 10,
};
