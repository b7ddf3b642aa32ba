use chrono::Datelike;
use chrono_tz::Tz;
use serde_json::Value;

use crate::types::{JsonMap, Timestamp};
use crate::validation::compiler::ResolvedParams;
use crate::validation::error::RuleError;
use crate::validation::rules::ValidationOutcome;

use super::calendar::{invalid_datetime, parse_timezone, resolve_instant, DaySpec};
use super::RuleCheck;

fn timezone_config(map: &mut JsonMap, timezone: Tz) {
    map.insert("timezone".into(), Value::String(timezone.name().into()));
}

// ---------------------------------------------------------------------------
// DayOfWeek
// ---------------------------------------------------------------------------

/// The value's weekday, in `timezone`, must match `day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOfWeekRule {
    day: DaySpec,
    timezone: Tz,
}

impl DayOfWeekRule {
    pub fn new(day: DaySpec, timezone: Tz) -> Self {
        Self { day, timezone }
    }

    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        let day = DaySpec::from_value(params, params.value("day"))?;
        let timezone = parse_timezone(params, params.str("timezone")?)?;
        Ok(Self::new(day, timezone))
    }

    pub fn matches_instant(&self, instant: Timestamp) -> bool {
        self.day
            .matches(instant.with_timezone(&self.timezone).weekday())
    }
}

impl RuleCheck for DayOfWeekRule {
    fn check(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome {
        let Some(instant) = resolve_instant(value, now) else {
            return invalid_datetime(attribute);
        };
        if self.matches_instant(instant) {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::fail(format!(
                "The {attribute} is not within the allowed day-of-week: {}.",
                self.day
            ))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("day".into(), Value::String(self.day.as_str().into()));
        timezone_config(&mut map, self.timezone);
        map
    }
}

// ---------------------------------------------------------------------------
// DaysOfWeek
// ---------------------------------------------------------------------------

/// The value's weekday, in `timezone`, must match at least one of `days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaysOfWeekRule {
    days: Vec<DaySpec>,
    timezone: Tz,
}

impl DaysOfWeekRule {
    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        let days = params
            .list("days")?
            .iter()
            .map(|v| DaySpec::from_value(params, v))
            .collect::<Result<Vec<_>, _>>()?;
        if days.is_empty() {
            return Err(params.invalid("The days array cannot be empty."));
        }
        let timezone = parse_timezone(params, params.str("timezone")?)?;
        Ok(Self { days, timezone })
    }
}

impl RuleCheck for DaysOfWeekRule {
    fn check(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome {
        let Some(instant) = resolve_instant(value, now) else {
            return invalid_datetime(attribute);
        };
        let weekday = instant.with_timezone(&self.timezone).weekday();
        if self.days.iter().any(|d| d.matches(weekday)) {
            ValidationOutcome::Pass
        } else {
            let days: Vec<&str> = self.days.iter().map(DaySpec::as_str).collect();
            ValidationOutcome::fail(format!(
                "The {attribute} is not within the allowed days of the week: {}.",
                days.join(", ")
            ))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert(
            "days".into(),
            Value::Array(
                self.days
                    .iter()
                    .map(|d| Value::String(d.as_str().into()))
                    .collect(),
            ),
        );
        timezone_config(&mut map, self.timezone);
        map
    }
}
