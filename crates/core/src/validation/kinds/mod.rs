//! Concrete rule kinds and the compiled-rule dispatch enum.

pub mod calendar;
pub mod day_of_week;
pub mod day_time;
pub mod enum_rule;
pub mod membership;
pub mod time_of_day;

use chrono::Utc;
use serde_json::Value;

use crate::types::{JsonMap, Timestamp};

use super::registry::RuleKind;
use super::rules::ValidationOutcome;

use day_of_week::{DayOfWeekRule, DaysOfWeekRule};
use day_time::DayTimeRule;
use enum_rule::EnumRule;
use membership::{NoneOfRule, OneOfRule};
use time_of_day::{TimeOfDayRule, TimesOfDayRule};

/// Behaviour shared by every concrete rule.
pub trait RuleCheck {
    /// Check `value` (the input's `attribute`, `Null` when absent).
    /// Time-based kinds use `now` when the value is empty.
    fn check(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome;

    /// Effective parameters under their primary names. Compiling the
    /// snapshot again yields an equivalent rule.
    fn config(&self) -> JsonMap;
}

/// A rule ready to evaluate values.
#[derive(Debug, Clone)]
pub enum CompiledRule {
    Enum(EnumRule),
    OneOf(OneOfRule),
    NoneOf(NoneOfRule),
    DayOfWeek(DayOfWeekRule),
    DaysOfWeek(DaysOfWeekRule),
    TimeOfDay(TimeOfDayRule),
    TimesOfDay(TimesOfDayRule),
    DayTime(DayTimeRule),
}

impl CompiledRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Enum(_) => RuleKind::Enum,
            Self::OneOf(_) => RuleKind::OneOf,
            Self::NoneOf(_) => RuleKind::NoneOf,
            Self::DayOfWeek(_) => RuleKind::DayOfWeek,
            Self::DaysOfWeek(_) => RuleKind::DaysOfWeek,
            Self::TimeOfDay(_) => RuleKind::TimeOfDay,
            Self::TimesOfDay(_) => RuleKind::TimesOfDay,
            Self::DayTime(_) => RuleKind::DayTime,
        }
    }

    fn inner(&self) -> &dyn RuleCheck {
        match self {
            Self::Enum(r) => r,
            Self::OneOf(r) => r,
            Self::NoneOf(r) => r,
            Self::DayOfWeek(r) => r,
            Self::DaysOfWeek(r) => r,
            Self::TimeOfDay(r) => r,
            Self::TimesOfDay(r) => r,
            Self::DayTime(r) => r,
        }
    }

    /// Validate against the current wall-clock time.
    pub fn validate(&self, attribute: &str, value: &Value) -> ValidationOutcome {
        self.validate_at(attribute, value, Utc::now())
    }

    pub fn validate_at(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome {
        self.inner().check(attribute, value, now)
    }

    pub fn config(&self) -> JsonMap {
        self.inner().config()
    }
}

/// Render a configured value for inclusion in a message: strings bare,
/// everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
