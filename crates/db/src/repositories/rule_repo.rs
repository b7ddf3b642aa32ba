//! Repository for the `rules` table.

use rulegate_core::types::DbId;
use serde_json::Value;
use sqlx::PgPool;

use crate::models::rule::{CreateRule, RuleRow, UpdateRule};

/// Column list for `rules` queries.
const COLUMNS: &str = "id, attribute, kind, parameters, created_at, updated_at";

/// Provides CRUD operations for rules.
pub struct RuleRepo;

impl RuleRepo {
    /// Insert a new rule, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRule) -> Result<RuleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO rules (attribute, kind, parameters) \
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RuleRow>(&query)
            .bind(&input.attribute)
            .bind(&input.kind)
            .bind(input.parameters.clone().map(Value::Object))
            .fetch_one(pool)
            .await
    }

    /// Find a rule by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RuleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules WHERE id = $1");
        sqlx::query_as::<_, RuleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all rules ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<RuleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rules ORDER BY id");
        sqlx::query_as::<_, RuleRow>(&query).fetch_all(pool).await
    }

    /// Update a rule. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRule,
    ) -> Result<Option<RuleRow>, sqlx::Error> {
        let query = format!(
            "UPDATE rules SET \
                attribute = COALESCE($2, attribute), \
                kind = COALESCE($3, kind), \
                parameters = COALESCE($4, parameters) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RuleRow>(&query)
            .bind(id)
            .bind(&input.attribute)
            .bind(&input.kind)
            .bind(input.parameters.clone().map(Value::Object))
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule by ID. Associations cascade. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
