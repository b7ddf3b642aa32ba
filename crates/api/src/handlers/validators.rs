//! Handlers for the `/validators` resource and validation runs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rulegate_core::error::CoreError;
use rulegate_core::types::{DbId, JsonMap};
use rulegate_core::validation::{RunMode, ValidationReport};
use rulegate_db::models::validator::{CreateValidator, UpdateValidator, ValidatorRow};
use rulegate_db::models::validator_rule::ValidatorRuleDetail;
use rulegate_db::repositories::{ValidatorRepo, ValidatorRuleRepo};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Validator",
        id,
    })
}

// ── Validator CRUD ───────────────────────────────────────────────────

/// POST /api/v1/validators
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateValidator>,
) -> AppResult<(StatusCode, Json<DataResponse<ValidatorRow>>)> {
    input.validate()?;
    let validator = ValidatorRepo::create(&state.pool, &input).await?;
    tracing::info!(validator_id = validator.id, name = %validator.name, "Validator created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(validator))))
}

/// GET /api/v1/validators
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ValidatorRow>>>> {
    let validators = ValidatorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(validators)))
}

/// GET /api/v1/validators/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ValidatorRow>>> {
    let validator = ValidatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(validator)))
}

/// PUT /api/v1/validators/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateValidator>,
) -> AppResult<Json<DataResponse<ValidatorRow>>> {
    input.validate()?;
    let validator = ValidatorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(validator)))
}

/// DELETE /api/v1/validators/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ValidatorRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/validators/{id}/rules
///
/// All rules attached to the validator (active or not) in evaluation order.
pub async fn list_rules(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ValidatorRuleDetail>>>> {
    ValidatorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let rules = ValidatorRuleRepo::rules_for_validator(&state.pool, id, false).await?;
    Ok(Json(DataResponse::new(rules)))
}

// ── Validation run ───────────────────────────────────────────────────

/// Query parameters for a validation run.
#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    /// Validator id or name. When absent, read from the body's
    /// `validator_id` field.
    pub validator_id: Option<String>,
    /// Overrides the configured `VALIDATION_MODE`.
    pub mode: Option<RunMode>,
}

/// The validator to run: the query parameter if given, else the record's
/// `validator_id` field (string or integer).
fn requested_validator(query: Option<&str>, record: &JsonMap) -> Result<String, AppError> {
    if let Some(key) = query.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    match record.get("validator_id") {
        Some(Value::String(key)) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        None | Some(Value::Null) => Err(AppError::BadRequest(
            "validator_id is required, as a query parameter or in the request body".into(),
        )),
        Some(other) => Err(AppError::BadRequest(format!(
            "validator_id must be a validator name or integer id, got {other}"
        ))),
    }
}

/// POST /api/v1/validators/validate[?validator_id=X][&mode=collect_all]
///
/// The request body is the input record; it may carry `validator_id`
/// itself. Responds 200 when the record passes and 422 when it does not
/// (including unknown or inactive validators); the report is in the
/// `data` envelope either way.
pub async fn validate(
    State(state): State<AppState>,
    Query(params): Query<ValidateParams>,
    Json(record): Json<JsonMap>,
) -> AppResult<(StatusCode, Json<DataResponse<ValidationReport>>)> {
    let validator = requested_validator(params.validator_id.as_deref(), &record)?;
    let service = state.validator_service();
    let mode = params.mode.unwrap_or(service.default_mode());
    let report = service.run_validator_with(&validator, &record, mode).await?;

    tracing::info!(
        %validator,
        ?mode,
        success = report.success,
        "Validation run complete",
    );
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(DataResponse::new(report))))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> JsonMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn query_parameter_takes_precedence() {
        let body = record(json!({ "validator_id": "FromBody" }));
        assert_eq!(
            requested_validator(Some("FromQuery"), &body).unwrap(),
            "FromQuery"
        );
    }

    #[test]
    fn body_field_accepts_names_and_ids() {
        let by_name = record(json!({ "validator_id": " StateValidator " }));
        assert_eq!(requested_validator(None, &by_name).unwrap(), "StateValidator");

        let by_id = record(json!({ "validator_id": 7 }));
        assert_eq!(requested_validator(Some("  "), &by_id).unwrap(), "7");
    }

    #[test]
    fn missing_or_malformed_id_is_a_bad_request() {
        assert_matches!(
            requested_validator(None, &JsonMap::new()),
            Err(AppError::BadRequest(msg)) if msg.contains("required")
        );
        assert_matches!(
            requested_validator(None, &record(json!({ "validator_id": null }))),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(
            requested_validator(None, &record(json!({ "validator_id": ["a"] }))),
            Err(AppError::BadRequest(msg)) if msg.contains("integer id")
        );
    }
}
