//! Rule, validator, and result types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, JsonMap};

/// Whether a validator (or a rule's membership in a validator) is in use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl ActiveStatus {
    /// Stable string representation, identical to the stored column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(format!(
                "The active status must be either Active or Inactive, got '{other}'"
            )),
        }
    }
}

/// A stored rule: which attribute it checks, which kind of check, and the
/// kind's parameters exactly as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleDefinition {
    pub id: DbId,
    pub attribute: String,
    pub kind: String,
    #[serde(default)]
    pub parameters: JsonMap,
}

/// A named, reusable set of rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatorDefinition {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub context: Option<String>,
    pub active_status: ActiveStatus,
    pub sort_order: i32,
}

/// Links a rule into a validator at a given evaluation position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidatorRuleAssociation {
    pub validator_id: DbId,
    pub rule_id: DbId,
    pub order_number: i32,
    pub active_status: ActiveStatus,
}

/// A rule definition together with its position inside a validator.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRule {
    pub definition: RuleDefinition,
    pub order_number: i32,
}

/// Result of evaluating one compiled rule against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Pass,
    Fail(String),
}

impl ValidationOutcome {
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Pass => None,
            Self::Fail(message) => Some(message),
        }
    }
}

/// How the runner aggregates rule failures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Stop at the first failing rule.
    #[default]
    ShortCircuit,
    /// Evaluate every rule and report all failures.
    CollectAll,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short_circuit" | "short-circuit" | "shortcircuit" => Ok(Self::ShortCircuit),
            "collect_all" | "collect-all" | "collectall" => Ok(Self::CollectAll),
            other => Err(format!(
                "unknown validation mode '{other}', expected short_circuit or collect_all"
            )),
        }
    }
}

/// Aggregated result of running a validator against one input record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub success: bool,
    /// Failure messages keyed by attribute name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    /// A successful report with no failures.
    pub fn passed() -> Self {
        Self {
            success: true,
            errors: BTreeMap::new(),
        }
    }

    /// A failed report with no attribute-level messages (e.g. nothing to
    /// validate against).
    pub fn failed() -> Self {
        Self {
            success: false,
            errors: BTreeMap::new(),
        }
    }

    pub fn record_failure(&mut self, attribute: &str, message: impl Into<String>) {
        self.success = false;
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded against `attribute`, empty when it passed.
    pub fn messages_for(&self, attribute: &str) -> &[String] {
        self.errors.get(attribute).map(Vec::as_slice).unwrap_or(&[])
    }
}
