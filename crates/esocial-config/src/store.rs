//! Configuration persistence.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use esocial_core::error::DomainError;

use crate::ServiceConfig;

/// Pluggable persisted-configuration backend.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Loads the stored configuration, falling back to defaults when nothing
    /// has been saved yet.
    async fn load(&self) -> Result<ServiceConfig, DomainError>;

    /// Persists the configuration. A concurrent reader must never observe a
    /// partial write.
    async fn save(&self, config: &ServiceConfig) -> Result<(), DomainError>;
}

/// JSON-file store using write-then-rename replacement.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigStore for JsonFileStore {
    async fn load(&self) -> Result<ServiceConfig, DomainError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                DomainError::Storage(format!("malformed configuration file: {err}"))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "no configuration file yet, using defaults"
                );
                Ok(ServiceConfig::default())
            }
            Err(err) => Err(DomainError::Storage(format!(
                "reading configuration file: {err}"
            ))),
        }
    }

    async fn save(&self, config: &ServiceConfig) -> Result<(), DomainError> {
        let bytes = serde_json::to_vec_pretty(config)
            .map_err(|err| DomainError::Storage(format!("encoding configuration: {err}")))?;
        let staged = self.path.with_extension("tmp");
        tokio::fs::write(&staged, &bytes)
            .await
            .map_err(|err| DomainError::Storage(format!("staging configuration file: {err}")))?;
        tokio::fs::rename(&staged, &self.path)
            .await
            .map_err(|err| DomainError::Storage(format!("replacing configuration file: {err}")))?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}
