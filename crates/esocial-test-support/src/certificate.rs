//! Stub `CertificateLoader` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use esocial_core::error::DomainError;
use esocial_transmission::certificate::{Certificate, CertificateLoader};

/// A loader that hands out a minimal DER stand-in and counts its calls.
#[derive(Debug, Default)]
pub struct RecordingCertificateLoader {
    loads: Mutex<Vec<String>>,
}

impl RecordingCertificateLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of load calls seen so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn load_count(&self) -> usize {
        self.loads.lock().unwrap().len()
    }
}

#[async_trait]
impl CertificateLoader for RecordingCertificateLoader {
    async fn load(&self, pfx_base64: &str, password: &str) -> Result<Certificate, DomainError> {
        self.loads.lock().unwrap().push(pfx_base64.to_string());
        Ok(Certificate::new(vec![0x30, 0x82, 0x01, 0x00], password))
    }
}

/// A loader that always fails, as a misconfigured certificate would.
#[derive(Debug, Default)]
pub struct FailingCertificateLoader;

#[async_trait]
impl CertificateLoader for FailingCertificateLoader {
    async fn load(&self, _pfx_base64: &str, _password: &str) -> Result<Certificate, DomainError> {
        Err(DomainError::Configuration(
            "certificate could not be loaded".to_string(),
        ))
    }
}
