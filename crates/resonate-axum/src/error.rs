//! Axum-specific error types and mappings.
//!
//! Every error renders as `{"error": "<message>"}` with no other keys; only
//! the status code differs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use resonate_core::{ErrorEnvelope, InferenceError};
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (undecodable audio).
    #[error("{0}")]
    BadRequest(String),

    /// The configured model or task cannot be served.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, axum::Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}

impl From<InferenceError> for HttpError {
    fn from(err: InferenceError) -> Self {
        if err.is_malformed() {
            Self::BadRequest(err.to_string())
        } else if err.is_unavailable() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}
