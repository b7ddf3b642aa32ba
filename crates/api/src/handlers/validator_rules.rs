//! Handlers for the `/validator-rules` association resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rulegate_core::error::CoreError;
use rulegate_core::types::DbId;
use rulegate_db::models::validator_rule::{
    CreateValidatorRule, UpdateValidatorRule, ValidatorRuleRow,
};
use rulegate_db::repositories::ValidatorRuleRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Associations are keyed by the pair; the 404 names the rule half.
fn not_found(validator_id: DbId, rule_id: DbId) -> AppError {
    tracing::debug!(validator_id, rule_id, "Validator-rule association not found");
    AppError::Core(CoreError::NotFound {
        entity: "ValidatorRule",
        id: rule_id,
    })
}

/// Filters for listing associations.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub validator_id: Option<DbId>,
}

/// POST /api/v1/validator-rules
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateValidatorRule>,
) -> AppResult<(StatusCode, Json<DataResponse<ValidatorRuleRow>>)> {
    input.validate()?;
    let link = ValidatorRuleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(link))))
}

/// GET /api/v1/validator-rules[?validator_id=X]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<ValidatorRuleRow>>>> {
    let links = ValidatorRuleRepo::list(&state.pool, params.validator_id).await?;
    Ok(Json(DataResponse::new(links)))
}

/// GET /api/v1/validator-rules/{validator_id}/{rule_id}
pub async fn get(
    State(state): State<AppState>,
    Path((validator_id, rule_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ValidatorRuleRow>>> {
    let link = ValidatorRuleRepo::find(&state.pool, validator_id, rule_id)
        .await?
        .ok_or_else(|| not_found(validator_id, rule_id))?;
    Ok(Json(DataResponse::new(link)))
}

/// PUT /api/v1/validator-rules/{validator_id}/{rule_id}
pub async fn update(
    State(state): State<AppState>,
    Path((validator_id, rule_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateValidatorRule>,
) -> AppResult<Json<DataResponse<ValidatorRuleRow>>> {
    input.validate()?;
    let link = ValidatorRuleRepo::update(&state.pool, validator_id, rule_id, &input)
        .await?
        .ok_or_else(|| not_found(validator_id, rule_id))?;
    Ok(Json(DataResponse::new(link)))
}

/// DELETE /api/v1/validator-rules/{validator_id}/{rule_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((validator_id, rule_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ValidatorRuleRepo::delete(&state.pool, validator_id, rule_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(validator_id, rule_id))
    }
}
