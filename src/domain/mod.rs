// Domain types and value objects
pub mod asset;
pub mod mode;

// Re-export commonly used types
pub use asset::{Asset, PerAsset};
pub use mode::{LabelStyle, Mode, View};
