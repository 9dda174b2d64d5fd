use chrono::{DateTime, Local, TimeZone};

use crate::domain::LabelStyle;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    /// e.g. `3:45:07 PM`
    pub const TIME_OF_DAY_FORMAT: &str = "%-I:%M:%S %p";
    /// e.g. `10/19/2026`
    pub const CALENDAR_DATE_FORMAT: &str = "%-m/%-d/%Y";
    // const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn format_for(style: LabelStyle) -> &'static str {
        match style {
            LabelStyle::TimeOfDay => Self::TIME_OF_DAY_FORMAT,
            LabelStyle::CalendarDate => Self::CALENDAR_DATE_FORMAT,
        }
    }
}

/// Render any zoned datetime as a sample label.
pub fn format_label<Tz: TimeZone>(datetime: &DateTime<Tz>, style: LabelStyle) -> String
where
    Tz::Offset: std::fmt::Display,
{
    datetime.format(TimeUtils::format_for(style)).to_string()
}

/// Local wall-clock label for a provider timestamp.
/// Returns `None` for out-of-range or ambiguous timestamps.
pub fn epoch_ms_to_local_label(epoch_ms: i64, style: LabelStyle) -> Option<String> {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|datetime| format_label(&datetime, style))
}

/// Label for "right now", used when a live sample arrives.
pub fn local_now_label() -> String {
    format_label(&Local::now(), LabelStyle::TimeOfDay)
}
