//! Handler for the `/rule-kinds` registry listing.

use axum::Json;
use rulegate_core::validation::list_kinds;
use rulegate_core::validation::registry::RuleKindInfo;

use crate::response::DataResponse;

/// GET /api/v1/rule-kinds
///
/// Every registered rule kind with its declared inputs (name, aliases,
/// whether required, default).
pub async fn list() -> Json<DataResponse<Vec<RuleKindInfo>>> {
    Json(DataResponse::new(list_kinds()))
}
