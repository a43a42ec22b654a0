//! Structural validation without transmission.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use esocial_events::event::EventType;

use crate::error::ErrorBody;
use crate::state::AppState;

/// Response for a structurally valid event.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub tipo: String,
    pub grupo: u8,
}

/// POST /validar
///
/// Presence checks only (`evento`, `tipo`, `dados`); never loads the
/// certificate or touches the transmitter. Failures enumerate every missing
/// piece in one message.
#[instrument(skip_all)]
async fn validate(Json(body): Json<Value>) -> Response {
    let mut problems = Vec::new();
    let mut parsed = None;

    match body.get("evento") {
        None => problems.push("missing_field:evento".to_string()),
        Some(evento) => {
            match evento
                .get("tipo")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|tipo| !tipo.is_empty())
            {
                None => problems.push("missing_field:tipo".to_string()),
                Some(tipo) => match tipo.parse::<EventType>() {
                    Ok(event_type) => parsed = Some(event_type),
                    Err(err) => problems.push(err.to_string()),
                },
            }
            if !evento.get("dados").is_some_and(Value::is_object) {
                problems.push("missing_field:dados".to_string());
            }
        }
    }

    match (parsed, problems.is_empty()) {
        (Some(event_type), true) => Json(ValidationReport {
            success: true,
            tipo: event_type.code().to_string(),
            grupo: event_type.group().number(),
        })
        .into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(problems.join(", "))),
        )
            .into_response(),
    }
}

/// Returns the validation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/validar", post(validate))
}
