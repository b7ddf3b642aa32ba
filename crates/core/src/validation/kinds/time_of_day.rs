use chrono::NaiveTime;
use chrono_tz::Tz;
use serde_json::Value;

use crate::types::{JsonMap, Timestamp};
use crate::validation::compiler::ResolvedParams;
use crate::validation::error::RuleError;
use crate::validation::rules::ValidationOutcome;

use super::calendar::{
    format_clock, invalid_datetime, parse_clock, parse_timezone, resolve_instant,
    truncate_to_minute,
};
use super::RuleCheck;

/// Inclusive `[start, end]` clock-time window at minute precision.
///
/// A window whose start is later than its end never matches; windows do
/// not wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    pub fn parse(params: &ResolvedParams, start: &str, end: &str) -> Result<Self, RuleError> {
        let clock = |raw: &str| {
            parse_clock(raw)
                .ok_or_else(|| params.invalid(format!("'{raw}' is not a valid HH:MM time")))
        };
        Ok(Self {
            start: clock(start)?,
            end: clock(end)?,
        })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        truncate_to_minute(time).is_some_and(|t| self.start <= t && t <= self.end)
    }

    fn describe(&self) -> String {
        format!("{} to {}", format_clock(self.start), format_clock(self.end))
    }

    fn to_pair(self) -> Value {
        Value::Array(vec![
            Value::String(format_clock(self.start)),
            Value::String(format_clock(self.end)),
        ])
    }
}

fn local_time(instant: Timestamp, timezone: Tz) -> NaiveTime {
    instant.with_timezone(&timezone).time()
}

// ---------------------------------------------------------------------------
// TimeOfDay
// ---------------------------------------------------------------------------

/// The value's clock time, in `timezone`, must fall inside one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDayRule {
    window: TimeWindow,
    timezone: Tz,
}

impl TimeOfDayRule {
    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        let window = TimeWindow::parse(params, params.str("start")?, params.str("end")?)?;
        let timezone = parse_timezone(params, params.str("timezone")?)?;
        Ok(Self { window, timezone })
    }
}

impl RuleCheck for TimeOfDayRule {
    fn check(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome {
        let Some(instant) = resolve_instant(value, now) else {
            return invalid_datetime(attribute);
        };
        if self.window.contains(local_time(instant, self.timezone)) {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::fail(format!(
                "The {attribute} is not within the allowed time range: {}.",
                self.window.describe()
            ))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("start".into(), Value::String(format_clock(self.window.start)));
        map.insert("end".into(), Value::String(format_clock(self.window.end)));
        map.insert("timezone".into(), Value::String(self.timezone.name().into()));
        map
    }
}

// ---------------------------------------------------------------------------
// TimesOfDay
// ---------------------------------------------------------------------------

/// The value's clock time, in `timezone`, must fall inside any window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesOfDayRule {
    windows: Vec<TimeWindow>,
    timezone: Tz,
}

impl TimesOfDayRule {
    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        let windows = params
            .list("windows")?
            .iter()
            .map(|entry| parse_window_entry(params, entry))
            .collect::<Result<Vec<_>, _>>()?;
        if windows.is_empty() {
            return Err(params.invalid("The windows array cannot be empty."));
        }
        let timezone = parse_timezone(params, params.str("timezone")?)?;
        Ok(Self { windows, timezone })
    }
}

/// A window entry is `["HH:MM", "HH:MM"]` or `{"start": .., "end": ..}`.
fn parse_window_entry(params: &ResolvedParams, entry: &Value) -> Result<TimeWindow, RuleError> {
    let bounds = match entry {
        Value::Array(pair) if pair.len() == 2 => pair[0].as_str().zip(pair[1].as_str()),
        Value::Object(map) => {
            let field = |keys: [&str; 2]| keys.iter().find_map(|k| map.get(*k)?.as_str());
            field(["start", "startTime"]).zip(field(["end", "endTime"]))
        }
        _ => None,
    };
    let (start, end) =
        bounds.ok_or_else(|| params.invalid(format!("{entry} is not a valid time range")))?;
    TimeWindow::parse(params, start, end)
}

impl RuleCheck for TimesOfDayRule {
    fn check(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome {
        let inside = resolve_instant(value, now)
            .map(|instant| local_time(instant, self.timezone))
            .is_some_and(|time| self.windows.iter().any(|w| w.contains(time)));
        if inside {
            ValidationOutcome::Pass
        } else {
            let windows: Vec<String> = self.windows.iter().map(TimeWindow::describe).collect();
            ValidationOutcome::fail(format!(
                "The {attribute} is not within any of the allowed time ranges: {}.",
                windows.join(", ")
            ))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert(
            "windows".into(),
            Value::Array(self.windows.iter().map(|w| w.to_pair()).collect()),
        );
        map.insert("timezone".into(), Value::String(self.timezone.name().into()));
        map
    }
}
