//! Single-event submission and status polling.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use esocial_core::error::ValidationError;
use esocial_events::envelope::build_envelope;
use esocial_events::event::{Event, EventType};
use esocial_events::normalize;
use esocial_transmission::client::{BatchStatus, SubmissionReceipt};

use crate::error::ApiError;
use crate::routes::SuccessBody;
use crate::state::AppState;

/// One event as described by the client: type tag plus raw payload.
#[derive(Debug, Deserialize)]
pub struct EventBody {
    pub tipo: Option<String>,
    pub dados: Option<Value>,
}

impl EventBody {
    /// Parses the tag and wraps the payload into a domain event.
    pub(crate) fn into_event(self) -> Result<Event, ValidationError> {
        let Some(tipo) = self.tipo.filter(|tipo| !tipo.trim().is_empty()) else {
            return Err(ValidationError::MissingField {
                field: "tipo".to_string(),
            });
        };
        let event_type: EventType = tipo.parse()?;
        let Some(payload) = self.dados else {
            return Err(ValidationError::MissingField {
                field: "dados".to_string(),
            });
        };
        Ok(Event {
            event_type,
            payload,
        })
    }
}

/// Request body for POST /eventos.
#[derive(Debug, Deserialize)]
pub struct SubmitEventRequest {
    pub evento: Option<EventBody>,
}

/// Query string for status polling.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub protocolo: Option<String>,
}

/// POST /eventos
#[instrument(skip_all)]
async fn submit_event(
    State(state): State<AppState>,
    Json(request): Json<SubmitEventRequest>,
) -> Result<Json<SuccessBody<SubmissionReceipt>>, ApiError> {
    let Some(body) = request.evento else {
        return Err(ValidationError::MissingField {
            field: "evento".to_string(),
        }
        .into());
    };
    let event = body.into_event()?;
    let event_type = event.event_type;

    let config = state.config.read().await.clone();
    let certificate_section = config.require_certificate()?;
    let employer = config.employer_context()?;
    let transmitter_ctx = config.transmitter_context();

    let payload = normalize::normalize(event, state.clock.as_ref())?;
    let document = build_envelope(event_type, payload, &employer, &transmitter_ctx);

    let certificate = state
        .certificate_loader
        .load(&certificate_section.pfx, &certificate_section.password)
        .await?;

    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, tipo = %event_type, grupo = %event_type.group(), "submitting event");

    let receipt = state
        .transmitter
        .submit_batch(
            event_type.group(),
            &[document],
            &certificate,
            &employer,
            &transmitter_ctx,
        )
        .await?;

    info!(%correlation_id, protocolo = %receipt.protocol, "event accepted");
    Ok(Json(SuccessBody::new(receipt)))
}

/// GET /eventos?protocolo=X
#[instrument(skip_all)]
async fn event_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<SuccessBody<BatchStatus>>, ApiError> {
    let status = query_protocol(&state, query).await?;
    Ok(Json(SuccessBody::new(status)))
}

/// Shared by the event- and batch-scoped status routes; both poll the same
/// collaborator by protocol number.
pub(crate) async fn query_protocol(
    state: &AppState,
    query: StatusQuery,
) -> Result<BatchStatus, ApiError> {
    let Some(protocol) = query
        .protocolo
        .map(|protocolo| protocolo.trim().to_string())
        .filter(|protocolo| !protocolo.is_empty())
    else {
        return Err(ValidationError::MissingField {
            field: "protocolo".to_string(),
        }
        .into());
    };
    Ok(state.transmitter.query_batch(&protocol).await?)
}

/// Returns the single-event router.
pub fn router() -> Router<AppState> {
    Router::new().route("/eventos", get(event_status).post(submit_event))
}
