//! Health endpoint and cross-cutting middleware behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].as_str().is_some());
    assert_eq!(json["rule_kinds"], 8);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_request_id_is_propagated(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert!(
        response.headers().contains_key("x-request-id"),
        "response should carry the generated request id"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_route_returns_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
