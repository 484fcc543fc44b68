use chrono::{TimeZone, Utc};

use crate::models::{LabelStyle, TimeRange};

/// Formats a point's display label for the requested range.
///
/// Labels are rendered in UTC so the same `(timestamp, range)` pair always
/// yields the same text.
pub fn format_label(timestamp: i64, range: &TimeRange) -> String {
    let Some(at) = Utc.timestamp_opt(timestamp, 0).single() else {
        return "Invalid Date".to_string();
    };

    let pattern = match range.label_style() {
        LabelStyle::Intraday => "%I:%M %p",
        LabelStyle::WeekdayTime => "%a %I:%M %p",
        LabelStyle::MonthDay => "%b %-d",
        LabelStyle::MonthYear => "%b %Y",
        LabelStyle::LocaleDate => "%-m/%-d/%Y",
    };
    at.format(pattern).to_string()
}
