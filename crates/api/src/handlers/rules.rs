//! Handlers for the `/rules` resource.
//!
//! Definitions are compiled before they are written, so a stored rule
//! always resolves to a known kind with valid parameters at write time.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rulegate_core::error::CoreError;
use rulegate_core::types::{DbId, JsonMap};
use rulegate_core::validation::{compile, compile_definition, RuleKind};
use rulegate_db::models::rule::{CreateRule, RuleRow, UpdateRule};
use rulegate_db::repositories::RuleRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Rule", id })
}

/// POST /api/v1/rules
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRule>,
) -> AppResult<(StatusCode, Json<DataResponse<RuleRow>>)> {
    input.validate()?;
    let parameters = input.parameters.clone().unwrap_or_default();
    compile(&input.kind, &parameters)?;

    let rule = RuleRepo::create(&state.pool, &input).await?;
    tracing::info!(rule_id = rule.id, kind = %rule.kind, "Rule created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(rule))))
}

/// GET /api/v1/rules
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<RuleRow>>>> {
    let rules = RuleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(rules)))
}

/// GET /api/v1/rules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RuleRow>>> {
    let rule = RuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(rule)))
}

/// Effective configuration of a compiled rule.
#[derive(Debug, Serialize)]
pub struct CompiledRuleView {
    pub id: DbId,
    pub kind: RuleKind,
    pub config: JsonMap,
}

/// GET /api/v1/rules/{id}/config
///
/// Compile the stored definition and return its configuration snapshot
/// (primary parameter names, defaults applied).
pub async fn get_config(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompiledRuleView>>> {
    let rule = RuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let compiled = compile_definition(&rule.to_definition())?;
    Ok(Json(DataResponse::new(CompiledRuleView {
        id,
        kind: compiled.kind(),
        config: compiled.config(),
    })))
}

/// PUT /api/v1/rules/{id}
///
/// The merged definition must still compile.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRule>,
) -> AppResult<Json<DataResponse<RuleRow>>> {
    input.validate()?;
    let existing = RuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    compile_definition(&input.apply_to(&existing.to_definition()))?;

    let rule = RuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(rule)))
}

/// DELETE /api/v1/rules/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if RuleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
