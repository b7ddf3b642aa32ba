//! Registry of rule kinds.
//!
//! The set of kinds is closed. Each kind declares the parameters it
//! accepts (primary name, accepted aliases, optional default) and a
//! constructor that turns resolved parameters into a [`CompiledRule`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::compiler::ResolvedParams;
use super::enums::final_segment;
use super::error::RuleError;
use super::kinds::day_of_week::{DayOfWeekRule, DaysOfWeekRule};
use super::kinds::day_time::DayTimeRule;
use super::kinds::enum_rule::EnumRule;
use super::kinds::membership::{NoneOfRule, OneOfRule};
use super::kinds::time_of_day::{TimeOfDayRule, TimesOfDayRule};
use super::kinds::CompiledRule;

/// Every kind of rule the engine can compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    Enum,
    OneOf,
    NoneOf,
    DayOfWeek,
    DaysOfWeek,
    TimeOfDay,
    TimesOfDay,
    DayTime,
}

/// Default applied when a parameter is absent from the stored definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Str(&'static str),
    EmptyList,
}

impl ParamDefault {
    pub fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.to_string()),
            Self::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Declared input of a rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default: Option<ParamDefault>,
}

impl ParamSpec {
    const fn required(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            default: None,
        }
    }

    const fn optional(
        name: &'static str,
        aliases: &'static [&'static str],
        default: ParamDefault,
    ) -> Self {
        Self {
            name,
            aliases,
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Primary name followed by the aliases, in lookup order.
    pub fn lookup_keys(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Parameter tables
// ---------------------------------------------------------------------------

const TIMEZONE: ParamSpec = ParamSpec::optional("timezone", &["tz"], ParamDefault::Str("UTC"));
const START: ParamSpec = ParamSpec::optional(
    "start",
    &["startTime", "start_time"],
    ParamDefault::Str("00:00"),
);
const END: ParamSpec =
    ParamSpec::optional("end", &["endTime", "end_time"], ParamDefault::Str("23:59"));

const ENUM_INPUTS: &[ParamSpec] = &[
    ParamSpec::required("enumClass", &["enum_class", "enum"]),
    ParamSpec::optional(
        "allowedValues",
        &["allowed_values"],
        ParamDefault::EmptyList,
    ),
];
const ONE_OF_INPUTS: &[ParamSpec] =
    &[ParamSpec::required("allowedValues", &["allowed_values", "values"])];
const NONE_OF_INPUTS: &[ParamSpec] = &[ParamSpec::required(
    "disallowedValues",
    &["disallowed_values", "values"],
)];
const DAY_OF_WEEK_INPUTS: &[ParamSpec] = &[
    ParamSpec::required("day", &["dayOfWeek", "day_of_week"]),
    TIMEZONE,
];
const DAYS_OF_WEEK_INPUTS: &[ParamSpec] = &[
    ParamSpec::required("days", &["daysOfWeek", "days_of_week"]),
    TIMEZONE,
];
const TIME_OF_DAY_INPUTS: &[ParamSpec] = &[START, END, TIMEZONE];
const TIMES_OF_DAY_INPUTS: &[ParamSpec] = &[
    ParamSpec::required("windows", &["timeRanges", "time_ranges"]),
    TIMEZONE,
];
const DAY_TIME_INPUTS: &[ParamSpec] = &[
    ParamSpec::optional(
        "day",
        &["dayOfWeek", "day_of_week"],
        ParamDefault::Str("All"),
    ),
    START,
    END,
    TIMEZONE,
];

impl RuleKind {
    pub const ALL: [RuleKind; 8] = [
        Self::Enum,
        Self::OneOf,
        Self::NoneOf,
        Self::DayOfWeek,
        Self::DaysOfWeek,
        Self::TimeOfDay,
        Self::TimesOfDay,
        Self::DayTime,
    ];

    /// Canonical name, as stored and as reported by the registry listing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enum => "Enum",
            Self::OneOf => "OneOf",
            Self::NoneOf => "NoneOf",
            Self::DayOfWeek => "DayOfWeek",
            Self::DaysOfWeek => "DaysOfWeek",
            Self::TimeOfDay => "TimeOfDay",
            Self::TimesOfDay => "TimesOfDay",
            Self::DayTime => "DayTime",
        }
    }

    /// Resolve a stored kind identifier.
    ///
    /// Matching is case-insensitive, tolerates a trailing `Rule` suffix and
    /// namespaced identifiers (`Rules\DayOfWeekRule`, `rules::OneOf`).
    pub fn resolve(identifier: &str) -> Result<Self, RuleError> {
        let segment = final_segment(identifier);
        let lowered = segment.to_ascii_lowercase();
        let bare = match lowered.strip_suffix("rule") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => lowered.as_str(),
        };
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(bare))
            .ok_or_else(|| RuleError::UnknownRuleKind(identifier.to_string()))
    }

    pub fn inputs(&self) -> &'static [ParamSpec] {
        match self {
            Self::Enum => ENUM_INPUTS,
            Self::OneOf => ONE_OF_INPUTS,
            Self::NoneOf => NONE_OF_INPUTS,
            Self::DayOfWeek => DAY_OF_WEEK_INPUTS,
            Self::DaysOfWeek => DAYS_OF_WEEK_INPUTS,
            Self::TimeOfDay => TIME_OF_DAY_INPUTS,
            Self::TimesOfDay => TIMES_OF_DAY_INPUTS,
            Self::DayTime => DAY_TIME_INPUTS,
        }
    }

    /// Build the compiled rule from fully resolved parameters.
    pub fn construct(&self, params: &ResolvedParams) -> Result<CompiledRule, RuleError> {
        Ok(match self {
            Self::Enum => CompiledRule::Enum(EnumRule::from_params(params)?),
            Self::OneOf => CompiledRule::OneOf(OneOfRule::from_params(params)?),
            Self::NoneOf => CompiledRule::NoneOf(NoneOfRule::from_params(params)?),
            Self::DayOfWeek => CompiledRule::DayOfWeek(DayOfWeekRule::from_params(params)?),
            Self::DaysOfWeek => CompiledRule::DaysOfWeek(DaysOfWeekRule::from_params(params)?),
            Self::TimeOfDay => CompiledRule::TimeOfDay(TimeOfDayRule::from_params(params)?),
            Self::TimesOfDay => CompiledRule::TimesOfDay(TimesOfDayRule::from_params(params)?),
            Self::DayTime => CompiledRule::DayTime(DayTimeRule::from_params(params)?),
        })
    }

    /// Serializable description of this kind for the registry listing.
    pub fn describe(&self) -> RuleKindInfo {
        RuleKindInfo {
            kind: *self,
            inputs: self
                .inputs()
                .iter()
                .map(|spec| ParamInfo {
                    name: spec.name,
                    aliases: spec.aliases.to_vec(),
                    required: spec.is_required(),
                    default: spec.default.map(ParamDefault::to_value),
                })
                .collect(),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleKindInfo {
    pub kind: RuleKind,
    pub inputs: Vec<ParamInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamInfo {
    pub name: &'static str,
    pub aliases: Vec<&'static str>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Every registered kind with its declared inputs.
pub fn list_kinds() -> Vec<RuleKindInfo> {
    RuleKind::ALL.iter().map(RuleKind::describe).collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn resolve_accepts_case_suffix_and_namespace_variants() {
        assert_eq!(RuleKind::resolve("OneOf").unwrap(), RuleKind::OneOf);
        assert_eq!(RuleKind::resolve("oneofrule").unwrap(), RuleKind::OneOf);
        assert_eq!(
            RuleKind::resolve("ThreeLeaf\\ValidationEngine\\Rules\\DayTimeRule").unwrap(),
            RuleKind::DayTime
        );
        assert_eq!(
            RuleKind::resolve("rules::TimesOfDay").unwrap(),
            RuleKind::TimesOfDay
        );
    }

    #[test]
    fn resolve_rejects_unknown_kinds() {
        assert_matches!(
            RuleKind::resolve("Regex"),
            Err(RuleError::UnknownRuleKind(name)) if name == "Regex"
        );
        assert_matches!(RuleKind::resolve("Rule"), Err(RuleError::UnknownRuleKind(_)));
        assert_matches!(RuleKind::resolve(""), Err(RuleError::UnknownRuleKind(_)));
    }

    #[test]
    fn as_str_resolves_back_to_the_same_kind() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::resolve(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn listing_reports_required_and_default_inputs() {
        let kinds = list_kinds();
        assert_eq!(kinds.len(), RuleKind::ALL.len());

        let day_time = kinds.iter().find(|k| k.kind == RuleKind::DayTime).unwrap();
        let names: Vec<_> = day_time.inputs.iter().map(|p| p.name).collect();
        assert_eq!(names, ["day", "start", "end", "timezone"]);
        assert!(day_time.inputs.iter().all(|p| !p.required));
        assert_eq!(
            day_time.inputs[1].default,
            Some(Value::String("00:00".into()))
        );

        let one_of = kinds.iter().find(|k| k.kind == RuleKind::OneOf).unwrap();
        assert!(one_of.inputs[0].required);
        assert_eq!(one_of.inputs[0].default, None);
    }
}
