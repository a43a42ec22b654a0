//! Integration tests for structural validation.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_structurally_complete_event_passes() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) = common::post_json(
        ctx.app,
        "/validar",
        &json!({"evento": {"tipo": "S-1000", "dados": {"infocadastro": {}}}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["tipo"], "S-1000");
    assert_eq!(json["grupo"], 1);
}

#[tokio::test]
async fn test_missing_dados_fails_without_touching_collaborators() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) =
        common::post_json(ctx.app, "/validar", &json!({"evento": {"tipo": "S-1000"}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "missing_field:dados");
    assert_eq!(ctx.certificate_loader.load_count(), 0);
    assert_eq!(ctx.transmitter.submission_count(), 0);
}

#[tokio::test]
async fn test_missing_evento_is_reported() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) = common::post_json(ctx.app, "/validar", &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_field:evento");
}

#[tokio::test]
async fn test_every_missing_piece_is_enumerated_in_one_message() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) = common::post_json(ctx.app, "/validar", &json!({"evento": {}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "missing_field:tipo, missing_field:dados");
}

#[tokio::test]
async fn test_unsupported_type_is_reported_alongside_missing_dados() {
    let ctx = common::build_test_app(common::configured());

    let (status, json) = common::post_json(
        ctx.app,
        "/validar",
        &json!({"evento": {"tipo": "S-9999"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "unsupported_event_type: S-9999, missing_field:dados"
    );
}
