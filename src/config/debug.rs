//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so debug
//! builds stay readable. Every use is further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit a line for every fetch issued and every result applied to the store.
    pub print_fetch_events: bool,
    /// Emit a line when a result is thrown away because the mode moved on.
    pub print_stale_discards: bool,
    /// Emit UI interaction logs (mode/view button clicks).
    pub print_ui_interactions: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch_events: false,
    print_stale_discards: true,
    print_ui_interactions: true,
    print_shutdown: false,
};
