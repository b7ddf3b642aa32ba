use serde_json::Value;

use crate::types::{JsonMap, Timestamp};
use crate::validation::compiler::ResolvedParams;
use crate::validation::enums::{EnumMember, NamedEnum};
use crate::validation::error::RuleError;
use crate::validation::rules::ValidationOutcome;

use super::{display_value, RuleCheck};

/// The value must be a member of `enum_type`, and of `allowed` when that
/// list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRule {
    enum_type: NamedEnum,
    allowed: Vec<EnumMember>,
}

impl EnumRule {
    pub fn new(enum_type: NamedEnum, allowed: Vec<EnumMember>) -> Self {
        Self { enum_type, allowed }
    }

    pub fn from_params(params: &ResolvedParams) -> Result<Self, RuleError> {
        let class = params.str("enumClass")?;
        let enum_type = NamedEnum::resolve(class)
            .ok_or_else(|| params.invalid(format!("The class {class} is not a valid enum.")))?;

        let mut allowed = Vec::new();
        let mut unresolved = Vec::new();
        for value in params.list("allowedValues")? {
            match value.as_str().and_then(|s| enum_type.find(s)) {
                Some(member) => allowed.push(member),
                None => unresolved.push(display_value(&value)),
            }
        }
        if !unresolved.is_empty() {
            return Err(params.invalid(format!(
                "At least one of [{}] is not a valid instance of {}.",
                unresolved.join(", "),
                enum_type.name()
            )));
        }
        Ok(Self::new(enum_type, allowed))
    }
}

impl RuleCheck for EnumRule {
    fn check(&self, attribute: &str, value: &Value, _now: Timestamp) -> ValidationOutcome {
        let Some(member) = value.as_str().and_then(|s| self.enum_type.find(s)) else {
            return ValidationOutcome::fail(format!(
                "The {attribute} must be a valid {}.",
                self.enum_type.name()
            ));
        };
        if self.allowed.is_empty() || self.allowed.contains(&member) {
            ValidationOutcome::Pass
        } else {
            let allowed: Vec<&str> = self.allowed.iter().map(|m| m.value.as_str()).collect();
            ValidationOutcome::fail(format!(
                "The {attribute} must be one of the allowed values: {}.",
                allowed.join(", ")
            ))
        }
    }

    fn config(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert("enumClass".into(), Value::String(self.enum_type.name().into()));
        map.insert(
            "allowedValues".into(),
            Value::Array(
                self.allowed
                    .iter()
                    .map(|m| Value::String(m.value.clone()))
                    .collect(),
            ),
        );
        map
    }
}
