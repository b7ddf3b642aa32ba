//! `OneOf` / `NoneOf`: membership in a list of literals and patterns.
//!
//! A configured member is a pattern when it is a `/body/flags` string
//! whose body compiles as a regular expression; anything else (including
//! a slash-delimited string that fails to compile) is a literal compared
//! by JSON equality. Patterns are matched against strings and against
//! numbers rendered as text.

use std::borrow::Cow;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::types::{JsonMap, Timestamp};
use crate::validation::compiler::ResolvedParams;
use crate::validation::error::RuleError;
use crate::validation::rules::ValidationOutcome;

use super::{display_value, RuleCheck};

const PATTERN_FLAGS: &str = "imsxuU";

#[derive(Debug, Clone)]
pub enum Candidate {
    Literal(Value),
    Pattern { source: String, regex: Regex },
}

impl Candidate {
    pub fn parse(value: &Value) -> Self {
        match value.as_str().and_then(compile_pattern) {
            Some(regex) => Self::Pattern {
                source: value.as_str().unwrap_or_default().to_string(),
                regex,
            },
            None => Self::Literal(value.clone()),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Literal(literal) => literal == value,
            Self::Pattern { regex, .. } => {
                pattern_subject(value).is_some_and(|subject| regex.is_match(&subject))
            }
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Literal(literal) => literal.clone(),
            Self::Pattern { source, .. } => Value::String(source.clone()),
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.to_value() == other.to_value()
    }
}

/// Compile a `/body/flags` pattern. `None` when `input` is not one.
fn compile_pattern(input: &str) -> Option<Regex> {
    let rest = input.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() || !flags.chars().all(|c| PATTERN_FLAGS.contains(c)) {
        return None;
    }

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            _ => &mut builder,
        };
    }
    builder.build().ok()
}

fn pattern_subject(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

fn candidates(params: &ResolvedParams, name: &str, label: &str) -> Result<Vec<Candidate>, RuleError> {
    let values = params.list(name)?;
    if values.is_empty() {
        return Err(params.invalid(format!("The {label} values array cannot be empty.")));
    }
    Ok(values.iter().map(Candidate::parse).collect())
}

fn render(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| display_value(&c.to_value()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn export(candidates: &[Candidate]) -> Value {
    Value::Array(candidates.iter().map(Candidate::to_value).collect())
}

// ---------------------------------------------------------------------------
// OneOf
// ---------------------------------------------------------------------------

/// Passes when the value matches at least one allowed member.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOfRule {
    allowed: Vec<Candidate>,
}

impl OneOfRule {
    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        Ok(Self {
            allowed: candidates(params, "allowedValues", "allowed")?,
        })
    }
}

impl RuleCheck for OneOfRule {
    fn check(&self, attribute: &str, value: &Value, _now: Timestamp) -> ValidationOutcome {
        if self.allowed.iter().any(|c| c.matches(value)) {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::fail(format!(
                "The {attribute} must be one of the allowed values: {}.",
                render(&self.allowed)
            ))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("allowedValues".into(), export(&self.allowed));
        map
    }
}

// ---------------------------------------------------------------------------
// NoneOf
// ---------------------------------------------------------------------------

/// Fails when the value matches any disallowed member.
#[derive(Debug, Clone, PartialEq)]
pub struct NoneOfRule {
    disallowed: Vec<Candidate>,
}

impl NoneOfRule {
    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        Ok(Self {
            disallowed: candidates(params, "disallowedValues", "disallowed")?,
        })
    }
}

impl RuleCheck for NoneOfRule {
    fn check(&self, attribute: &str, value: &Value, _now: Timestamp) -> ValidationOutcome {
        match self.disallowed.iter().find(|c| c.matches(value)) {
            None => ValidationOutcome::Pass,
            Some(Candidate::Pattern { source, .. }) => ValidationOutcome::fail(format!(
                "The {attribute} must not match the pattern {source}."
            )),
            Some(Candidate::Literal(_)) => ValidationOutcome::fail(format!(
                "The {attribute} must not be one of the following values: {}.",
                render(&self.disallowed)
            )),
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("disallowedValues".into(), export(&self.disallowed));
        map
    }
}
