//! Batched submission and status polling.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use esocial_core::error::ValidationError;
use esocial_events::envelope::prepare_batch;
use esocial_transmission::client::{BatchStatus, SubmissionReceipt};

use crate::error::ApiError;
use crate::routes::SuccessBody;
use crate::routes::events::{EventBody, StatusQuery, query_protocol};
use crate::state::AppState;

/// Request body for POST /lotes.
#[derive(Debug, Deserialize)]
pub struct SubmitBatchRequest {
    pub eventos: Option<Vec<EventBody>>,
}

/// POST /lotes
///
/// All-or-nothing: the first event that fails to parse or normalize aborts
/// the whole batch before anything is sent.
#[instrument(skip_all)]
async fn submit_batch(
    State(state): State<AppState>,
    Json(request): Json<SubmitBatchRequest>,
) -> Result<Json<SuccessBody<SubmissionReceipt>>, ApiError> {
    let Some(bodies) = request.eventos else {
        return Err(ValidationError::MissingField {
            field: "eventos".to_string(),
        }
        .into());
    };
    // First failing event by input order decides the error.
    let mut events = Vec::with_capacity(bodies.len());
    for body in bodies {
        events.push(body.into_event()?);
    }

    let config = state.config.read().await.clone();
    let certificate_section = config.require_certificate()?;
    let employer = config.employer_context()?;
    let transmitter_ctx = config.transmitter_context();

    let batch = prepare_batch(events, &employer, &transmitter_ctx, state.clock.as_ref())?;

    let certificate = state
        .certificate_loader
        .load(&certificate_section.pfx, &certificate_section.password)
        .await?;

    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, grupo = %batch.group, eventos = batch.documents.len(), "submitting batch");

    let receipt = state
        .transmitter
        .submit_batch(
            batch.group,
            &batch.documents,
            &certificate,
            &employer,
            &transmitter_ctx,
        )
        .await?;

    info!(%correlation_id, protocolo = %receipt.protocol, "batch accepted");
    Ok(Json(SuccessBody::new(receipt)))
}

/// GET /lotes?protocolo=X
#[instrument(skip_all)]
async fn batch_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<SuccessBody<BatchStatus>>, ApiError> {
    let status = query_protocol(&state, query).await?;
    Ok(Json(SuccessBody::new(status)))
}

/// Returns the batch router.
pub fn router() -> Router<AppState> {
    Router::new().route("/lotes", get(batch_status).post(submit_batch))
}
