//! [`RuleStore`] backed by PostgreSQL.

use async_trait::async_trait;
use rulegate_core::types::DbId;
use rulegate_core::validation::{OrderedRule, RuleStore, ValidatorDefinition};

use crate::repositories::{ValidatorRepo, ValidatorRuleRepo};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgRuleStore {
    pool: DbPool,
}

impl PgRuleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleStore for PgRuleStore {
    type Error = sqlx::Error;

    async fn find_active_validator(
        &self,
        id_or_name: &str,
    ) -> Result<Option<ValidatorDefinition>, sqlx::Error> {
        let row = ValidatorRepo::find_active_by_id_or_name(&self.pool, id_or_name).await?;
        Ok(row.map(|r| r.to_definition()))
    }

    async fn active_rules_for_validator(
        &self,
        validator_id: DbId,
    ) -> Result<Vec<OrderedRule>, sqlx::Error> {
        let rows = ValidatorRuleRepo::rules_for_validator(&self.pool, validator_id, true).await?;
        tracing::debug!(validator_id, rule_count = rows.len(), "Loaded active rules");
        Ok(rows.iter().map(|r| r.to_ordered_rule()).collect())
    }
}
