//! Route definitions for the `/rules` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rules;
use crate::state::AppState;

/// Routes mounted at `/rules`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// GET    /{id}/config  -> get_config
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rules::list).post(rules::create))
        .route(
            "/{id}",
            get(rules::get_by_id)
                .put(rules::update)
                .delete(rules::delete),
        )
        .route("/{id}/config", get(rules::get_config))
}
