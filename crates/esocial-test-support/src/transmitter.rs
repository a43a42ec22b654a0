//! Stub `Transmitter` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use esocial_core::context::{EmployerContext, TransmitterContext};
use esocial_core::error::DomainError;
use esocial_events::envelope::EventDocument;
use esocial_events::event::EventGroup;
use esocial_transmission::certificate::Certificate;
use esocial_transmission::client::{BatchStatus, SubmissionReceipt, Transmitter};

/// Protocol number every recorded submission is acknowledged with.
pub const STUB_PROTOCOL: &str = "1.2.202601.0000001";

/// A transmitter that records every call and returns canned results.
/// Tests asserting "nothing was sent" check [`submission_count`] stayed at
/// zero.
///
/// [`submission_count`]: RecordingTransmitter::submission_count
#[derive(Debug, Default)]
pub struct RecordingTransmitter {
    submissions: Mutex<Vec<(EventGroup, Vec<EventDocument>)>>,
    queries: Mutex<Vec<String>>,
}

impl RecordingTransmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of submission calls seen so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Snapshot of the submitted batches, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn submissions(&self) -> Vec<(EventGroup, Vec<EventDocument>)> {
        self.submissions.lock().unwrap().clone()
    }

    /// Protocols queried so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn queried_protocols(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transmitter for RecordingTransmitter {
    async fn submit_batch(
        &self,
        group: EventGroup,
        documents: &[EventDocument],
        _certificate: &Certificate,
        _employer: &EmployerContext,
        _transmitter: &TransmitterContext,
    ) -> Result<SubmissionReceipt, DomainError> {
        self.submissions
            .lock()
            .unwrap()
            .push((group, documents.to_vec()));
        Ok(SubmissionReceipt {
            protocol: STUB_PROTOCOL.to_string(),
            message: Some("Lote recebido".to_string()),
        })
    }

    async fn query_batch(&self, protocol: &str) -> Result<BatchStatus, DomainError> {
        self.queries.lock().unwrap().push(protocol.to_string());
        Ok(BatchStatus {
            protocol: protocol.to_string(),
            status: "PROCESSADO".to_string(),
            receipts: vec![],
        })
    }
}

/// A transmitter that always fails. Useful for error-handling paths.
#[derive(Debug, Default)]
pub struct FailingTransmitter;

#[async_trait]
impl Transmitter for FailingTransmitter {
    async fn submit_batch(
        &self,
        _group: EventGroup,
        _documents: &[EventDocument],
        _certificate: &Certificate,
        _employer: &EmployerContext,
        _transmitter: &TransmitterContext,
    ) -> Result<SubmissionReceipt, DomainError> {
        Err(DomainError::Transmission(
            "government service unavailable".to_string(),
        ))
    }

    async fn query_batch(&self, _protocol: &str) -> Result<BatchStatus, DomainError> {
        Err(DomainError::Transmission(
            "government service unavailable".to_string(),
        ))
    }
}
