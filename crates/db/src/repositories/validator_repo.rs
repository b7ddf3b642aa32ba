//! Repository for the `validators` table.

use rulegate_core::types::DbId;
use sqlx::PgPool;

use crate::models::validator::{CreateValidator, UpdateValidator, ValidatorRow};

/// Column list for `validators` queries.
const COLUMNS: &str = "id, name, description, context, sort_order, active_status, \
                        created_at, updated_at";

/// Provides CRUD operations and run-time lookup for validators.
pub struct ValidatorRepo;

impl ValidatorRepo {
    /// Insert a new validator, returning the created row.
    ///
    /// `sort_order` defaults to 0 and `active_status` to `Active`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateValidator,
    ) -> Result<ValidatorRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO validators (name, description, context, sort_order, active_status) \
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 'Active')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ValidatorRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.context)
            .bind(input.sort_order)
            .bind(input.active_status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }

    /// Find a validator by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ValidatorRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM validators WHERE id = $1");
        sqlx::query_as::<_, ValidatorRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all validators ordered by `sort_order`, then ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<ValidatorRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM validators ORDER BY sort_order, id");
        sqlx::query_as::<_, ValidatorRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Resolve a validator for a validation run.
    ///
    /// Matches by name, or by ID when `id_or_name` is numeric. Only
    /// `Active` validators are considered; the lowest `sort_order` wins.
    pub async fn find_active_by_id_or_name(
        pool: &PgPool,
        id_or_name: &str,
    ) -> Result<Option<ValidatorRow>, sqlx::Error> {
        let key = id_or_name.trim();
        let numeric_id = key.parse::<DbId>().ok();
        let query = format!(
            "SELECT {COLUMNS} FROM validators \
             WHERE active_status = 'Active' \
               AND (name = $1 OR id = $2) \
             ORDER BY sort_order, id \
             LIMIT 1"
        );
        sqlx::query_as::<_, ValidatorRow>(&query)
            .bind(key)
            .bind(numeric_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a validator. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateValidator,
    ) -> Result<Option<ValidatorRow>, sqlx::Error> {
        let query = format!(
            "UPDATE validators SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                context = COALESCE($4, context), \
                sort_order = COALESCE($5, sort_order), \
                active_status = COALESCE($6, active_status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ValidatorRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.context)
            .bind(input.sort_order)
            .bind(input.active_status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a validator by ID. Associations cascade. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM validators WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
