pub mod health;
pub mod rules;
pub mod validator_rules;
pub mod validators;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rule-kinds                                      registered kinds (GET)
///
/// /rules                                           list, create
/// /rules/{id}                                      get, update, delete
/// /rules/{id}/config                               compiled configuration (GET)
///
/// /validators                                      list, create
/// /validators/validate                             run a validator (POST)
/// /validators/{id}                                 get, update, delete
/// /validators/{id}/rules                           attached rules in order (GET)
///
/// /validator-rules                                 list, create
/// /validator-rules/{validator_id}/{rule_id}        get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/rule-kinds", get(handlers::rule_kinds::list))
        .nest("/rules", rules::router())
        .nest("/validators", validators::router())
        .nest("/validator-rules", validator_rules::router())
}
