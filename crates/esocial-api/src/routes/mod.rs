//! Route modules, one per surface.

pub mod batches;
pub mod config;
pub mod events;
pub mod health;
pub mod validate;

use serde::Serialize;

/// Uniform success envelope carrying the route's payload under `data`.
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessBody<T> {
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
