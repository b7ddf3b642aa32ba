use serde_json::Value;

use crate::types::{JsonMap, Timestamp};
use crate::validation::compiler::ResolvedParams;
use crate::validation::error::RuleError;
use crate::validation::rules::ValidationOutcome;

use super::day_of_week::DayOfWeekRule;
use super::time_of_day::TimeOfDayRule;
use super::RuleCheck;

/// Conjunction of a day-of-week check and a time-of-day check sharing one
/// timezone. Both checks always run; every failure message is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTimeRule {
    day: DayOfWeekRule,
    time: TimeOfDayRule,
}

impl DayTimeRule {
    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        Ok(Self {
            day: DayOfWeekRule::from_params(params)?,
            time: TimeOfDayRule::from_params(params)?,
        })
    }
}

impl RuleCheck for DayTimeRule {
    fn check(&self, attribute: &str, value: &Value, now: Timestamp) -> ValidationOutcome {
        let mut messages: Vec<String> = Vec::new();
        for outcome in [
            self.day.check(attribute, value, now),
            self.time.check(attribute, value, now),
        ] {
            if let ValidationOutcome::Fail(message) = outcome {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
        }
        if messages.is_empty() {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::Fail(messages.join(" "))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = self.day.config();
        map.extend(self.time.config());
        map
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::validation::compiler::compile;
    use crate::validation::kinds::CompiledRule;

    use super::*;

    fn new_york_monday_business_hours() -> CompiledRule {
        compile(
            "DayTime",
            json!({
                "day": "Monday",
                "start": "09:00",
                "end": "17:00",
                "timezone": "America/New_York"
            })
            .as_object()
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn passes_inside_the_local_window() {
        let rule = new_york_monday_business_hours();
        let now = Utc.with_ymd_and_hms(2024, 10, 14, 13, 0, 0).unwrap();
        assert!(rule.validate_at("when", &Value::Null, now).passed());
        assert!(rule
            .validate_at("when", &json!("2024-10-14T13:00:00Z"), now)
            .passed());
    }

    #[test]
    fn fails_outside_the_local_window() {
        let rule = new_york_monday_business_hours();
        let now = Utc.with_ymd_and_hms(2024, 10, 14, 23, 0, 0).unwrap();
        assert_eq!(
            rule.validate_at("when", &Value::Null, now),
            ValidationOutcome::fail(
                "The when is not within the allowed time range: 09:00 to 17:00."
            )
        );
    }

    #[test]
    fn reports_both_failures() {
        let rule = new_york_monday_business_hours();
        // Saturday 03:00 UTC is Friday 23:00 in New York.
        let outcome = rule.validate_at("when", &json!("2024-10-19T03:00:00Z"), Utc::now());
        assert_eq!(
            outcome,
            ValidationOutcome::fail(
                "The when is not within the allowed day-of-week: Monday. \
                 The when is not within the allowed time range: 09:00 to 17:00."
            )
        );
    }

    #[test]
    fn unparsable_value_is_reported_once() {
        let rule = new_york_monday_business_hours();
        assert_eq!(
            rule.validate_at("when", &json!("later"), Utc::now()),
            ValidationOutcome::fail("The when is not a valid date/time.")
        );
    }

    #[test]
    fn defaults_and_merged_config() {
        let rule = compile("DayTime", &JsonMap::new()).unwrap();
        assert!(rule.validate_at("when", &json!("2024-10-19 04:00"), Utc::now()).passed());
        assert_eq!(
            Value::Object(rule.config()),
            json!({ "day": "All", "start": "00:00", "end": "23:59", "timezone": "UTC" })
        );
    }

    #[test]
    fn invalid_timezone_is_a_configuration_error() {
        assert_matches!(
            compile("DayTime", json!({ "timezone": "Nowhere" }).as_object().unwrap()),
            Err(RuleError::InvalidRuleConfiguration { .. })
        );
    }
}
