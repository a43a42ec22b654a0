//! API error envelope and status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use esocial_core::error::{DomainError, ValidationError};

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    /// Message starting with the machine-readable code.
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(DomainError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            // Client-fixable: bad input, or the gateway was never configured.
            DomainError::Validation(_) | DomainError::Configuration(_) => StatusCode::BAD_REQUEST,
            DomainError::Storage(_) | DomainError::Transmission(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorBody::new(self.0.to_string()))).into_response()
    }
}

/// Fallback handler for unmatched routes.
pub async fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("route not found"))).into_response()
}
