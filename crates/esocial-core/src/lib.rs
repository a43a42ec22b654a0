//! Shared domain primitives for the eSocial gateway.
//!
//! Everything in this crate is storage-free and collaborator-free: the error
//! taxonomy, the clock abstraction, tax identifier and period
//! canonicalization, and the employer/transmitter contexts attached to
//! outgoing documents.

pub mod clock;
pub mod context;
pub mod error;
pub mod period;
pub mod tax_id;
