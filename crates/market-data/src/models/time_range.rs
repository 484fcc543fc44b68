use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chart time range requested by the dashboard.
///
/// Unknown tokens are kept verbatim in [`TimeRange::Other`] so they can be
/// echoed back as the graph's timespan label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[default]
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    YearToDate,
    OneYear,
    FiveYears,
    Max,
    Other(String),
}

/// Density and span of a synthesized series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Number of points.
    pub points: usize,
    /// Time between consecutive points.
    pub step: Duration,
}

impl Resolution {
    fn new(points: usize, step: Duration) -> Self {
        Self { points, step }
    }

    /// Total span covered by the window (`points * step`).
    pub fn span(&self) -> Duration {
        self.step * self.points as i32
    }
}

/// How the date bucketer renders labels for a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStyle {
    /// `09:30 AM`
    Intraday,
    /// `Mon 09:30 AM`
    WeekdayTime,
    /// `Jan 5`
    MonthDay,
    /// `Jan 2024`
    MonthYear,
    /// `1/5/2024`
    LocaleDate,
}

impl TimeRange {
    /// Parses a range token. Tokens are matched exactly (`"1D"`, `"YTD"`, ...).
    pub fn parse(token: &str) -> Self {
        match token {
            "1D" => TimeRange::OneDay,
            "5D" => TimeRange::FiveDays,
            "1M" => TimeRange::OneMonth,
            "3M" => TimeRange::ThreeMonths,
            "6M" => TimeRange::SixMonths,
            "YTD" => TimeRange::YearToDate,
            "1Y" => TimeRange::OneYear,
            "5Y" => TimeRange::FiveYears,
            "MAX" => TimeRange::Max,
            other => TimeRange::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimeRange::OneDay => "1D",
            TimeRange::FiveDays => "5D",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::SixMonths => "6M",
            TimeRange::YearToDate => "YTD",
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::Max => "MAX",
            TimeRange::Other(token) => token,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TimeRange::Other(_))
    }

    /// Point count and step of a synthesized series for this range.
    pub fn resolution(&self) -> Resolution {
        match self {
            TimeRange::OneDay => Resolution::new(24, Duration::hours(1)),
            TimeRange::FiveDays => Resolution::new(30, Duration::hours(4)),
            TimeRange::OneMonth => Resolution::new(30, Duration::days(1)),
            TimeRange::ThreeMonths => Resolution::new(45, Duration::days(2)),
            TimeRange::SixMonths => Resolution::new(52, Duration::hours(84)),
            TimeRange::YearToDate | TimeRange::OneYear => Resolution::new(52, Duration::weeks(1)),
            TimeRange::FiveYears => Resolution::new(60, Duration::days(30)),
            TimeRange::Max => Resolution::new(100, Duration::days(90)),
            TimeRange::Other(_) => Resolution::new(20, Duration::hours(6)),
        }
    }

    pub fn label_style(&self) -> LabelStyle {
        match self {
            TimeRange::OneDay => LabelStyle::Intraday,
            TimeRange::FiveDays => LabelStyle::WeekdayTime,
            TimeRange::OneMonth
            | TimeRange::ThreeMonths
            | TimeRange::SixMonths
            | TimeRange::YearToDate
            | TimeRange::OneYear => LabelStyle::MonthDay,
            TimeRange::FiveYears | TimeRange::Max => LabelStyle::MonthYear,
            TimeRange::Other(_) => LabelStyle::LocaleDate,
        }
    }

    /// How long a fetched result for this range stays fresh in the query layer.
    pub fn stale_after(&self) -> StdDuration {
        const MINUTE: u64 = 60;
        let secs = match self {
            TimeRange::OneDay => MINUTE,
            TimeRange::FiveDays => 5 * MINUTE,
            TimeRange::OneMonth | TimeRange::ThreeMonths => 15 * MINUTE,
            TimeRange::SixMonths | TimeRange::YearToDate | TimeRange::OneYear => 60 * MINUTE,
            TimeRange::FiveYears | TimeRange::Max => 4 * 60 * MINUTE,
            TimeRange::Other(_) => 5 * MINUTE,
        };
        StdDuration::from_secs(secs)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TimeRange::parse(s))
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(TimeRange::parse(&token))
    }
}
