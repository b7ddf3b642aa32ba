//! Repository for the `validator_rules` association table.

use rulegate_core::types::DbId;
use sqlx::PgPool;

use crate::models::validator_rule::{
    CreateValidatorRule, UpdateValidatorRule, ValidatorRuleDetail, ValidatorRuleRow,
};

/// Column list for `validator_rules` queries.
const COLUMNS: &str = "validator_id, rule_id, order_number, active_status, created_at, updated_at";

/// Column list for rule-through-validator queries.
const DETAIL_COLUMNS: &str = "r.id AS rule_id, r.attribute, r.kind, r.parameters, \
                              vr.order_number, vr.active_status";

/// Provides CRUD operations for validator-rule associations, keyed by
/// `(validator_id, rule_id)`.
pub struct ValidatorRuleRepo;

impl ValidatorRuleRepo {
    /// Attach a rule to a validator, returning the created association.
    pub async fn create(
        pool: &PgPool,
        input: &CreateValidatorRule,
    ) -> Result<ValidatorRuleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO validator_rules (validator_id, rule_id, order_number, active_status) \
             VALUES ($1, $2, $3, COALESCE($4, 'Active')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ValidatorRuleRow>(&query)
            .bind(input.validator_id)
            .bind(input.rule_id)
            .bind(input.order_number)
            .bind(input.active_status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        validator_id: DbId,
        rule_id: DbId,
    ) -> Result<Option<ValidatorRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM validator_rules WHERE validator_id = $1 AND rule_id = $2"
        );
        sqlx::query_as::<_, ValidatorRuleRow>(&query)
            .bind(validator_id)
            .bind(rule_id)
            .fetch_optional(pool)
            .await
    }

    /// List associations, optionally restricted to one validator.
    pub async fn list(
        pool: &PgPool,
        validator_id: Option<DbId>,
    ) -> Result<Vec<ValidatorRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM validator_rules \
             WHERE ($1::BIGINT IS NULL OR validator_id = $1) \
             ORDER BY validator_id, order_number, rule_id"
        );
        sqlx::query_as::<_, ValidatorRuleRow>(&query)
            .bind(validator_id)
            .fetch_all(pool)
            .await
    }

    /// Rules attached to a validator in `order_number` order.
    ///
    /// With `active_only`, inactive associations are skipped.
    pub async fn rules_for_validator(
        pool: &PgPool,
        validator_id: DbId,
        active_only: bool,
    ) -> Result<Vec<ValidatorRuleDetail>, sqlx::Error> {
        let active_clause = if active_only {
            "AND vr.active_status = 'Active' "
        } else {
            ""
        };
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM validator_rules vr \
             JOIN rules r ON r.id = vr.rule_id \
             WHERE vr.validator_id = $1 \
               {active_clause}\
             ORDER BY vr.order_number, r.id"
        );
        sqlx::query_as::<_, ValidatorRuleDetail>(&query)
            .bind(validator_id)
            .fetch_all(pool)
            .await
    }

    /// Update an association. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the association does not exist.
    pub async fn update(
        pool: &PgPool,
        validator_id: DbId,
        rule_id: DbId,
        input: &UpdateValidatorRule,
    ) -> Result<Option<ValidatorRuleRow>, sqlx::Error> {
        let query = format!(
            "UPDATE validator_rules SET \
                order_number = COALESCE($3, order_number), \
                active_status = COALESCE($4, active_status) \
             WHERE validator_id = $1 AND rule_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ValidatorRuleRow>(&query)
            .bind(validator_id)
            .bind(rule_id)
            .bind(input.order_number)
            .bind(input.active_status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Detach a rule from a validator. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, validator_id: DbId, rule_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM validator_rules WHERE validator_id = $1 AND rule_id = $2")
                .bind(validator_id)
                .bind(rule_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
