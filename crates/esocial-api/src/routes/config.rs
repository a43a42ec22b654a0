//! Configuration read and save endpoints.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::{info, instrument};

use esocial_config::{ConfigUpdate, ServiceConfig};

use crate::error::ApiError;
use crate::routes::SuccessBody;
use crate::state::AppState;

/// GET /config
#[instrument(skip_all)]
async fn read_config(State(state): State<AppState>) -> Json<ServiceConfig> {
    Json(state.config.read().await.redacted())
}

/// POST /config
///
/// Section-wise merge into the stored configuration; the cache is updated
/// only after the file write succeeded.
#[instrument(skip_all)]
async fn save_config(
    State(state): State<AppState>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<SuccessBody<ServiceConfig>>, ApiError> {
    let merged = state.config.read().await.merged_with(update)?;
    state.config_store.save(&merged).await?;
    *state.config.write().await = merged.clone();

    info!(environment = ?merged.environment, "configuration saved");
    Ok(Json(SuccessBody::new(merged.redacted())))
}

/// Returns the configuration router.
pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(read_config).post(save_config))
}
