//! Integration tests for the health endpoint and the router fallback.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) = common::get_json(ctx.app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], "1.5.0");
    assert_eq!(json["timestamp"], "2026-01-15T10:00:00+00:00");
}

#[tokio::test]
async fn test_unknown_route_returns_404_with_the_error_envelope() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) = common::get_json(ctx.app, "/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "route not found");
}
