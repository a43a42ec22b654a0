//! Shared application state.

use std::sync::Arc;

use tokio::sync::RwLock;

use esocial_config::ServiceConfig;
use esocial_config::store::ConfigStore;
use esocial_core::clock::Clock;
use esocial_transmission::certificate::CertificateLoader;
use esocial_transmission::client::Transmitter;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached configuration, primed from the store at startup. Written only
    /// by the save path, and only after the file write succeeded.
    pub config: Arc<RwLock<ServiceConfig>>,
    pub config_store: Arc<dyn ConfigStore>,
    pub certificate_loader: Arc<dyn CertificateLoader>,
    pub transmitter: Arc<dyn Transmitter>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state with the configuration cache primed.
    #[must_use]
    pub fn new(
        config: ServiceConfig,
        config_store: Arc<dyn ConfigStore>,
        certificate_loader: Arc<dyn CertificateLoader>,
        transmitter: Arc<dyn Transmitter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_store,
            certificate_loader,
            transmitter,
            clock,
        }
    }
}
