//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use esocial_api::state::AppState;
use esocial_config::ServiceConfig;
use esocial_test_support::{
    FixedClock, InMemoryConfigStore, RecordingCertificateLoader, RecordingTransmitter,
};

/// App router plus the collaborator handles tests assert against.
pub struct TestContext {
    pub app: Router,
    pub transmitter: Arc<RecordingTransmitter>,
    pub certificate_loader: Arc<RecordingCertificateLoader>,
    pub store: Arc<InMemoryConfigStore>,
}

/// Configuration with employer and certificate filled in.
pub fn configured() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.employer.number = "12.345.678/0001-95".to_string();
    config.employer.legal_name = "Empresa Exemplo Ltda".to_string();
    config.certificate.pfx = "MIIBAA==".to_string();
    config.certificate.password = "secret".to_string();
    config
}

/// Build the full app router over recording stubs and a fixed clock. Uses the
/// same route structure as `main.rs`.
pub fn build_test_app(config: ServiceConfig) -> TestContext {
    let transmitter = Arc::new(RecordingTransmitter::new());
    let certificate_loader = Arc::new(RecordingCertificateLoader::new());
    let store = Arc::new(InMemoryConfigStore::new(config.clone()));
    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    ));

    let state = AppState::new(
        config,
        store.clone(),
        certificate_loader.clone(),
        transmitter.clone(),
        clock,
    );

    TestContext {
        app: esocial_api::app(state),
        transmitter,
        certificate_loader,
        store,
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
