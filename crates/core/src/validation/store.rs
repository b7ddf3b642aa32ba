//! Storage seam for validators and their rules.

use std::convert::Infallible;

use async_trait::async_trait;

use crate::types::DbId;

use super::rules::{OrderedRule, RuleDefinition, ValidatorDefinition, ValidatorRuleAssociation};

/// Read access the validator service needs.
#[async_trait]
pub trait RuleStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The first active validator whose id (when `id_or_name` is numeric) or
    /// name equals `id_or_name`, ordered by `sort_order` then id.
    async fn find_active_validator(
        &self,
        id_or_name: &str,
    ) -> Result<Option<ValidatorDefinition>, Self::Error>;

    /// Rules attached to the validator through active associations, with
    /// their order numbers.
    async fn active_rules_for_validator(
        &self,
        validator_id: DbId,
    ) -> Result<Vec<OrderedRule>, Self::Error>;
}

/// Whether `validator` is addressed by `id_or_name`.
pub fn matches_id_or_name(validator: &ValidatorDefinition, id_or_name: &str) -> bool {
    let key = id_or_name.trim();
    validator.name == key || key.parse::<DbId>().is_ok_and(|id| id == validator.id)
}

/// Store backed by plain vectors; used in tests and embedded setups.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRuleStore {
    validators: Vec<ValidatorDefinition>,
    rules: Vec<RuleDefinition>,
    associations: Vec<ValidatorRuleAssociation>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(mut self, validator: ValidatorDefinition) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn with_rule(mut self, rule: RuleDefinition) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_association(mut self, association: ValidatorRuleAssociation) -> Self {
        self.associations.push(association);
        self
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    type Error = Infallible;

    async fn find_active_validator(
        &self,
        id_or_name: &str,
    ) -> Result<Option<ValidatorDefinition>, Infallible> {
        Ok(self
            .validators
            .iter()
            .filter(|v| v.active_status.is_active() && matches_id_or_name(v, id_or_name))
            .min_by_key(|v| (v.sort_order, v.id))
            .cloned())
    }

    async fn active_rules_for_validator(
        &self,
        validator_id: DbId,
    ) -> Result<Vec<OrderedRule>, Infallible> {
        Ok(self
            .associations
            .iter()
            .filter(|a| a.validator_id == validator_id && a.active_status.is_active())
            .filter_map(|a| {
                self.rules
                    .iter()
                    .find(|r| r.id == a.rule_id)
                    .map(|definition| OrderedRule {
                        definition: definition.clone(),
                        order_number: a.order_number,
                    })
            })
            .collect())
    }
}
