use std::fmt;

use clap::ValueEnum;

/// What the dashboard is currently showing: the live rolling feed or a
/// fixed historical window.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, ValueEnum, strum_macros::EnumIter,
)]
pub enum Mode {
    #[default]
    #[value(name = "live")]
    Live,
    #[value(name = "30")]
    Window30d,
    #[value(name = "180")]
    Window180d,
    #[value(name = "365")]
    Window365d,
}

impl Mode {
    /// Day count sent to the market chart endpoint. `None` for live mode.
    pub fn window_days(&self) -> Option<u32> {
        match self {
            Mode::Live => None,
            Mode::Window30d => Some(30),
            Mode::Window180d => Some(180),
            Mode::Window365d => Some(365),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Mode::Live)
    }

    /// Human readable span, used by the subtitle ("last 1 Month").
    pub fn span_text(&self) -> &'static str {
        match self {
            Mode::Live => "Live",
            Mode::Window30d => "1 Month",
            Mode::Window180d => "6 Months",
            Mode::Window365d => "1 Year",
        }
    }

    pub fn label_style(&self) -> LabelStyle {
        match self.window_days() {
            None => LabelStyle::TimeOfDay,
            Some(days) => LabelStyle::for_window_days(days),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.window_days() {
            None => write!(f, "live"),
            Some(days) => write!(f, "{}d", days),
        }
    }
}

/// Presentation selector. Has no effect on fetching.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, ValueEnum, strum_macros::EnumIter,
)]
pub enum View {
    #[default]
    Graph,
    Comparison,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            View::Graph => write!(f, "graph"),
            View::Comparison => write!(f, "comparison"),
        }
    }
}

/// How a sample's label is rendered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LabelStyle {
    TimeOfDay,
    CalendarDate,
}

impl LabelStyle {
    /// Intraday (1 day) windows get time-of-day labels, anything longer gets dates.
    pub fn for_window_days(days: u32) -> Self {
        if days <= 1 {
            LabelStyle::TimeOfDay
        } else {
            LabelStyle::CalendarDate
        }
    }
}
