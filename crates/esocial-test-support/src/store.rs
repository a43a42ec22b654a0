//! Stub `ConfigStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use esocial_config::ServiceConfig;
use esocial_config::store::ConfigStore;
use esocial_core::error::DomainError;

/// A configuration store backed by process memory.
#[derive(Debug)]
pub struct InMemoryConfigStore {
    config: Mutex<ServiceConfig>,
}

impl InMemoryConfigStore {
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    /// Snapshot of the currently stored configuration.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> ServiceConfig {
        self.config.lock().unwrap().clone()
    }
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load(&self) -> Result<ServiceConfig, DomainError> {
        Ok(self.config.lock().unwrap().clone())
    }

    async fn save(&self, config: &ServiceConfig) -> Result<(), DomainError> {
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }
}

/// A configuration store that always fails. Useful for error-handling paths.
#[derive(Debug, Default)]
pub struct FailingConfigStore;

#[async_trait]
impl ConfigStore for FailingConfigStore {
    async fn load(&self) -> Result<ServiceConfig, DomainError> {
        Err(DomainError::Storage("disk unavailable".to_string()))
    }

    async fn save(&self, _config: &ServiceConfig) -> Result<(), DomainError> {
        Err(DomainError::Storage("disk unavailable".to_string()))
    }
}
