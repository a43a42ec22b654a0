//! eSocial gateway server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use esocial_api::state::AppState;
use esocial_config::store::{ConfigStore, JsonFileStore};
use esocial_core::clock::SystemClock;
use esocial_transmission::certificate::Base64CertificateLoader;
use esocial_transmission::client::{HttpTransmitter, TransmissionConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting eSocial gateway");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let config_path =
        std::env::var("ESOCIAL_CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string());
    let transmission_url = std::env::var("TRANSMISSION_BASE_URL")
        .map_err(|_| "TRANSMISSION_BASE_URL environment variable must be set")?;
    let timeout_secs: u64 = std::env::var("TRANSMISSION_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .map_err(|e| format!("TRANSMISSION_TIMEOUT_SECS must be a valid u64: {e}"))?;

    // Prime the configuration cache from the persisted file.
    let config_store: Arc<dyn ConfigStore> = Arc::new(JsonFileStore::new(config_path));
    let config = config_store.load().await?;

    let mut transmission_config = TransmissionConfig::new(transmission_url);
    transmission_config.timeout_secs = timeout_secs;
    let transmitter = HttpTransmitter::new(transmission_config)?;

    // Build application state and router.
    let app_state = AppState::new(
        config,
        config_store,
        Arc::new(Base64CertificateLoader),
        Arc::new(transmitter),
        Arc::new(SystemClock),
    );
    let app = esocial_api::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
