//! Day, clock-time, timezone, and instant parsing shared by the
//! time-based rule kinds.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde_json::Value;

use crate::types::Timestamp;
use crate::validation::compiler::ResolvedParams;
use crate::validation::enums::NamedEnum;
use crate::validation::error::RuleError;
use crate::validation::rules::ValidationOutcome;

/// A configured day: one weekday or a group of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySpec {
    Day(Weekday),
    Weekend,
    Weekday,
    All,
}

impl DaySpec {
    /// Parse a `DayOfWeek` member by value or case-insensitive name.
    pub fn parse(input: &str) -> Option<Self> {
        let member = NamedEnum::DayOfWeek.find(input.trim())?;
        Some(match member.value.as_str() {
            "Monday" => Self::Day(Weekday::Mon),
            "Tuesday" => Self::Day(Weekday::Tue),
            "Wednesday" => Self::Day(Weekday::Wed),
            "Thursday" => Self::Day(Weekday::Thu),
            "Friday" => Self::Day(Weekday::Fri),
            "Saturday" => Self::Day(Weekday::Sat),
            "Sunday" => Self::Day(Weekday::Sun),
            "Weekend" => Self::Weekend,
            "Weekday" => Self::Weekday,
            _ => Self::All,
        })
    }

    pub fn from_value(params: &ResolvedParams, value: &Value) -> Result<Self, RuleError> {
        value
            .as_str()
            .and_then(Self::parse)
            .ok_or_else(|| params.invalid(format!("{value} is not a valid day of the week")))
    }

    pub fn matches(&self, day: Weekday) -> bool {
        match self {
            Self::Day(d) => *d == day,
            Self::Weekend => matches!(day, Weekday::Sat | Weekday::Sun),
            Self::Weekday => !matches!(day, Weekday::Sat | Weekday::Sun),
            Self::All => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day(Weekday::Mon) => "Monday",
            Self::Day(Weekday::Tue) => "Tuesday",
            Self::Day(Weekday::Wed) => "Wednesday",
            Self::Day(Weekday::Thu) => "Thursday",
            Self::Day(Weekday::Fri) => "Friday",
            Self::Day(Weekday::Sat) => "Saturday",
            Self::Day(Weekday::Sun) => "Sunday",
            Self::Weekend => "Weekend",
            Self::Weekday => "Weekday",
            Self::All => "All",
        }
    }
}

impl fmt::Display for DaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an IANA timezone name (`UTC`, `America/New_York`).
pub fn parse_timezone(params: &ResolvedParams, name: &str) -> Result<Tz, RuleError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| params.invalid(format!("'{name}' is not a valid timezone")))
}

/// Parse an `HH:MM` (or `HH:MM:SS`) clock time, truncated to the minute.
pub fn parse_clock(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    let time = NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()?;
    truncate_to_minute(time)
}

pub fn truncate_to_minute(time: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%:z"];

/// Resolve an input value to an instant.
///
/// Failure for a value that [`resolve_instant`] cannot read.
pub fn invalid_datetime(attribute: &str) -> ValidationOutcome {
    ValidationOutcome::fail(format!("The {attribute} is not a valid date/time."))
}

/// `null`, an empty string, or a missing attribute mean `now`. Strings
/// without an offset are read as UTC; bare clock times are placed on the
/// current UTC date. Integers are unix seconds. `None` means the value is
/// not a date/time.
pub fn resolve_instant(value: &Value, now: Timestamp) -> Option<Timestamp> {
    match value {
        Value::Null => Some(now),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        Value::String(s) => parse_instant(s, now),
        _ => None,
    }
}

fn parse_instant(input: &str, now: Timestamp) -> Option<Timestamp> {
    let input = input.trim();
    if input.is_empty() {
        return Some(now);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = strip_utc_marker(input);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    let time = NaiveTime::parse_from_str(naive, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(naive, "%H:%M"))
        .ok()?;
    Some(now.date_naive().and_time(time).and_utc())
}

fn strip_utc_marker(input: &str) -> &str {
    for marker in [" UTC", " utc", "Z", "z"] {
        if let Some(stripped) = input.strip_suffix(marker) {
            return stripped.trim_end();
        }
    }
    input
}
