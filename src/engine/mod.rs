pub mod core;
pub mod fetch;
pub mod messages;
pub mod poller;
pub mod state;

// Re-export key components
pub use self::core::PulseEngine;
pub use state::SeriesStore;
