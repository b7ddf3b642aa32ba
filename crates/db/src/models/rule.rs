use rulegate_core::types::{DbId, JsonMap, Timestamp};
use rulegate_core::validation::RuleDefinition;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RuleRow {
    pub id: DbId,
    pub attribute: String,
    pub kind: String,
    pub parameters: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RuleRow {
    pub fn to_definition(&self) -> RuleDefinition {
        RuleDefinition {
            id: self.id,
            attribute: self.attribute.clone(),
            kind: self.kind.clone(),
            parameters: self.parameters.as_object().cloned().unwrap_or_default(),
        }
    }
}

/// DTO for creating a rule.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRule {
    #[validate(length(min = 1, max = 255))]
    pub attribute: String,
    #[validate(length(min = 1, max = 255))]
    pub kind: String,
    pub parameters: Option<JsonMap>,
}

/// DTO for updating a rule. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRule {
    #[validate(length(min = 1, max = 255))]
    pub attribute: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub kind: Option<String>,
    pub parameters: Option<JsonMap>,
}

impl UpdateRule {
    /// The definition `existing` would have after this update.
    pub fn apply_to(&self, existing: &RuleDefinition) -> RuleDefinition {
        RuleDefinition {
            id: existing.id,
            attribute: self
                .attribute
                .clone()
                .unwrap_or_else(|| existing.attribute.clone()),
            kind: self.kind.clone().unwrap_or_else(|| existing.kind.clone()),
            parameters: self
                .parameters
                .clone()
                .unwrap_or_else(|| existing.parameters.clone()),
        }
    }
}
