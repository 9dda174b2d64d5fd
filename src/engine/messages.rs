use crate::data::error::FetchError;
use crate::data::normalize::{HistoricalSnapshot, LiveSample};
use crate::domain::Mode;

/// Stamped on every fetch when it is issued. The engine compares it with its
/// own state when the result comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Engine generation at issue time. Bumped on every mode change.
    pub generation: u64,
    pub mode: Mode,
    /// Issue order within a generation (live polls only, historical is always 0)
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub enum FetchPayload {
    Live(LiveSample),
    Historical(HistoricalSnapshot),
}

/// The result returned by a background fetch
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub ticket: FetchTicket,
    pub duration_ms: u128,

    // Success: normalized data ready for the store
    // Failure: why it didn't get there
    pub result: Result<FetchPayload, FetchError>,
}
