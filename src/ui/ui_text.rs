//! Every user-facing string in one place.

pub struct UiText {
    pub app_title: &'static str,
    pub live_subtitle: &'static str,
    pub historical_subtitle_prefix: &'static str,
    pub mode_live: &'static str,
    pub mode_month: &'static str,
    pub mode_half_year: &'static str,
    pub mode_year: &'static str,
    pub view_graph: &'static str,
    pub view_comparison: &'static str,
    pub table_heading_live: &'static str,
    pub table_heading_historical: &'static str,
    pub table_time_column: &'static str,
    pub table_date_column: &'static str,
    pub table_price_suffix: &'static str,
    pub plot_y_axis: &'static str,
    pub waiting_for_data: &'static str,
    pub waiting_helper: &'static str,
    pub status_polling: &'static str,
    pub status_snapshot: &'static str,
    pub status_last_update: &'static str,
    pub status_rows: &'static str,
    pub status_discarded: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "💹 CryptoPulse",
    live_subtitle: "Live cryptocurrency dashboard (auto-refreshes every {secs} seconds)",
    historical_subtitle_prefix: "Historical cryptocurrency prices (last ",
    mode_live: "🔴 Live",
    mode_month: "📆 1 Month",
    mode_half_year: "🗓 6 Months",
    mode_year: "📊 1 Year",
    view_graph: "📈 Graph",
    view_comparison: "📋 Comparison",
    table_heading_live: "Latest Live Prices",
    table_heading_historical: "Historical Price Data",
    table_time_column: "Time",
    table_date_column: "Date",
    table_price_suffix: " (USD)",
    plot_y_axis: "Price (USD)",
    waiting_for_data: "Waiting for prices...",
    waiting_helper: "The first response from the price API has not arrived yet",
    status_polling: "POLLING",
    status_snapshot: "SNAPSHOT",
    status_last_update: "Updated",
    status_rows: "Rows",
    status_discarded: "Stale dropped",
};
