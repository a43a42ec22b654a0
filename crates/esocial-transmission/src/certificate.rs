//! Certificate material for the signing collaborator.

use std::fmt;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use esocial_core::error::DomainError;

/// PKCS#12 archive bytes plus their password, as handed to the signing
/// collaborator. The gateway never opens the archive itself.
#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
    password: String,
}

impl Certificate {
    #[must_use]
    pub fn new(der: Vec<u8>, password: impl Into<String>) -> Self {
        Self {
            der,
            password: password.into(),
        }
    }

    /// Raw PKCS#12 archive bytes.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Archive password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The password must never reach logs.
        f.debug_struct("Certificate")
            .field("der_len", &self.der.len())
            .field("password", &"***")
            .finish()
    }
}

/// Pluggable certificate source.
#[async_trait]
pub trait CertificateLoader: Send + Sync {
    /// Materializes a certificate from base64 PKCS#12 bytes and a password.
    ///
    /// # Errors
    ///
    /// [`DomainError::Configuration`] when the material cannot be used:
    /// empty or undecodable base64, non-DER content, or an empty password.
    async fn load(&self, pfx_base64: &str, password: &str) -> Result<Certificate, DomainError>;
}

/// Loader for certificates stored inline in the configuration file.
///
/// Validates the base64 and the DER framing only; opening the archive and
/// checking the password against it is the signing collaborator's job.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64CertificateLoader;

#[async_trait]
impl CertificateLoader for Base64CertificateLoader {
    async fn load(&self, pfx_base64: &str, password: &str) -> Result<Certificate, DomainError> {
        if password.is_empty() {
            return Err(DomainError::Configuration(
                "certificate password is empty".to_string(),
            ));
        }
        let der = BASE64.decode(pfx_base64.trim()).map_err(|err| {
            DomainError::Configuration(format!("certificate is not valid base64: {err}"))
        })?;
        if der.is_empty() {
            return Err(DomainError::Configuration(
                "certificate material is empty".to_string(),
            ));
        }
        // A PKCS#12 archive is a DER SEQUENCE; anything else is not one.
        if der[0] != 0x30 {
            return Err(DomainError::Configuration(
                "certificate is not a DER-encoded PKCS#12 archive".to_string(),
            ));
        }
        Ok(Certificate::new(der, password))
    }
}
