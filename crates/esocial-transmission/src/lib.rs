//! Collaborator boundary for signing and submission.
//!
//! The gateway never parses PKCS#12 archives, builds XML, or speaks SOAP;
//! this crate carries the certificate material and bridges prepared batches
//! to the external signing/transmission service over HTTP.

pub mod certificate;
pub mod client;
