//! Route definitions for the `/validators` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::validators;
use crate::state::AppState;

/// Routes mounted at `/validators`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// POST   /validate      -> validate    (?validator_id, ?mode)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// GET    /{id}/rules    -> list_rules
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(validators::list).post(validators::create))
        .route("/validate", post(validators::validate))
        .route(
            "/{id}",
            get(validators::get_by_id)
                .put(validators::update)
                .delete(validators::delete),
        )
        .route("/{id}/rules", get(validators::list_rules))
}
