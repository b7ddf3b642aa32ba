//! Rule configuration errors.
//!
//! These describe a malformed *rule*, never a failing input value. A
//! value rejected by a well-formed rule is a
//! [`ValidationOutcome::Fail`](super::rules::ValidationOutcome).

use super::registry::RuleKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Unknown rule kind: '{0}'")]
    UnknownRuleKind(String),

    #[error("{kind} rule is missing required parameter '{name}'")]
    MissingRequiredParameter { kind: RuleKind, name: &'static str },

    #[error("Invalid {kind} rule configuration: {detail}")]
    InvalidRuleConfiguration { kind: RuleKind, detail: String },
}

impl RuleError {
    pub fn invalid(kind: RuleKind, detail: impl Into<String>) -> Self {
        Self::InvalidRuleConfiguration {
            kind,
            detail: detail.into(),
        }
    }
}
