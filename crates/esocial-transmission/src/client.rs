//! HTTP bridge to the signing/transmission service.
//!
//! The bridge signs each document with the supplied certificate, wraps the
//! batch in the government SOAP envelope, and forwards it; this client only
//! ships prepared batches to it and maps its responses onto the domain
//! error taxonomy. Retry policy belongs to the bridge, not here.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::json;

use esocial_core::context::{EmployerContext, TransmitterContext};
use esocial_core::error::DomainError;
use esocial_events::envelope::EventDocument;
use esocial_events::event::EventGroup;

use crate::certificate::Certificate;

/// Tracking data returned for an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Protocol number for status polling.
    #[serde(rename = "protocolo")]
    pub protocol: String,
    /// Collaborator-side message, when present.
    #[serde(rename = "mensagem", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Processing state of a previously submitted batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStatus {
    #[serde(rename = "protocolo")]
    pub protocol: String,
    #[serde(rename = "situacao")]
    pub status: String,
    /// Per-event receipts, present once the government service processed
    /// the batch.
    #[serde(rename = "recibos", default)]
    pub receipts: Vec<serde_json::Value>,
}

/// Signing and submission collaborator.
#[async_trait]
pub trait Transmitter: Send + Sync {
    /// Signs and submits one prepared batch.
    ///
    /// # Errors
    ///
    /// [`DomainError::Transmission`] on signing failure, network failure,
    /// or government-side rejection.
    async fn submit_batch(
        &self,
        group: EventGroup,
        documents: &[EventDocument],
        certificate: &Certificate,
        employer: &EmployerContext,
        transmitter: &TransmitterContext,
    ) -> Result<SubmissionReceipt, DomainError>;

    /// Queries the processing state of a submitted batch by protocol number.
    ///
    /// # Errors
    ///
    /// [`DomainError::Transmission`] on network failure or when the service
    /// does not recognize the protocol.
    async fn query_batch(&self, protocol: &str) -> Result<BatchStatus, DomainError>;
}

/// Configuration for the HTTP transmission bridge.
#[derive(Debug, Clone)]
pub struct TransmissionConfig {
    /// Base URL of the bridge, e.g. `http://localhost:8800`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TransmissionConfig {
    /// Configuration with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }
}

/// [`Transmitter`] over HTTP/JSON.
#[derive(Debug)]
pub struct HttpTransmitter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransmitter {
    /// Builds the bridge client.
    ///
    /// # Errors
    ///
    /// [`DomainError::Transmission`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: TransmissionConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| DomainError::Transmission(format!("building HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<reqwest::Response, DomainError> {
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                DomainError::Transmission(format!("{operation}: timed out"))
            } else {
                DomainError::Transmission(format!("{operation}: {err}"))
            }
        })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Transmission(format!(
                "{operation}: HTTP {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl Transmitter for HttpTransmitter {
    async fn submit_batch(
        &self,
        group: EventGroup,
        documents: &[EventDocument],
        certificate: &Certificate,
        employer: &EmployerContext,
        transmitter: &TransmitterContext,
    ) -> Result<SubmissionReceipt, DomainError> {
        let url = format!("{}/lotes", self.base_url);
        let body = json!({
            "grupo": group,
            "eventos": documents,
            "certificado": {
                "pfx": BASE64.encode(certificate.der()),
                "senha": certificate.password(),
            },
            "empregador": {
                "tpInsc": employer.tax_id.kind,
                "nrInsc": employer.tax_id.digits,
                "nmRazao": employer.legal_name,
            },
            "transmissor": {
                "tpInsc": transmitter.kind,
                "nrInsc": transmitter.tax_id,
            },
        });

        tracing::debug!(grupo = %group, eventos = documents.len(), "forwarding batch to bridge");
        let response = self.send(self.client.post(&url).json(&body), "submit_batch").await?;
        response.json().await.map_err(|err| {
            DomainError::Transmission(format!("submit_batch: unreadable response: {err}"))
        })
    }

    async fn query_batch(&self, protocol: &str) -> Result<BatchStatus, DomainError> {
        let url = format!("{}/lotes/{protocol}", self.base_url);
        let response = self.send(self.client.get(&url), "query_batch").await?;
        response.json().await.map_err(|err| {
            DomainError::Transmission(format!("query_batch: unreadable response: {err}"))
        })
    }
}
