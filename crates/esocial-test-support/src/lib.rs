//! Shared stub collaborators for the eSocial gateway test suites.

mod certificate;
mod clock;
mod store;
mod transmitter;

pub use certificate::{FailingCertificateLoader, RecordingCertificateLoader};
pub use clock::FixedClock;
pub use store::{FailingConfigStore, InMemoryConfigStore};
pub use transmitter::{FailingTransmitter, RecordingTransmitter, STUB_PROTOCOL};
