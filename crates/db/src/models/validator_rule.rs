use rulegate_core::types::{DbId, Timestamp};
use rulegate_core::validation::{ActiveStatus, OrderedRule, RuleDefinition};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `validator_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ValidatorRuleRow {
    pub validator_id: DbId,
    pub rule_id: DbId,
    pub order_number: i32,
    pub active_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A rule as seen through one validator: `rules` joined with
/// `validator_rules`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ValidatorRuleDetail {
    pub rule_id: DbId,
    pub attribute: String,
    pub kind: String,
    pub parameters: serde_json::Value,
    pub order_number: i32,
    pub active_status: String,
}

impl ValidatorRuleDetail {
    pub fn to_ordered_rule(&self) -> OrderedRule {
        OrderedRule {
            definition: RuleDefinition {
                id: self.rule_id,
                attribute: self.attribute.clone(),
                kind: self.kind.clone(),
                parameters: self.parameters.as_object().cloned().unwrap_or_default(),
            },
            order_number: self.order_number,
        }
    }
}

/// DTO for attaching a rule to a validator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateValidatorRule {
    pub validator_id: DbId,
    pub rule_id: DbId,
    #[validate(range(min = 0))]
    pub order_number: i32,
    pub active_status: Option<ActiveStatus>,
}

/// DTO for updating an association. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateValidatorRule {
    #[validate(range(min = 0))]
    pub order_number: Option<i32>,
    pub active_status: Option<ActiveStatus>,
}
