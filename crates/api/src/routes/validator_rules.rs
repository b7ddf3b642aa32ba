//! Route definitions for the `/validator-rules` association resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::validator_rules;
use crate::state::AppState;

/// Routes mounted at `/validator-rules`.
///
/// ```text
/// GET    /                         -> list    (?validator_id)
/// POST   /                         -> create
/// GET    /{validator_id}/{rule_id} -> get
/// PUT    /{validator_id}/{rule_id} -> update
/// DELETE /{validator_id}/{rule_id} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(validator_rules::list).post(validator_rules::create),
        )
        .route(
            "/{validator_id}/{rule_id}",
            get(validator_rules::get)
                .put(validator_rules::update)
                .delete(validator_rules::delete),
        )
}
