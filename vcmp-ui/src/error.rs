//! Error types for vcmp-ui
//!
//! Every core error reaches the browser as JSON with a stable code; nothing is
//! swallowed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Session error
    #[error(transparent)]
    Session(#[from] vcmp_common::Error),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        use vcmp_common::Error as E;

        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Session(err) => match err {
                E::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                E::NoActiveTrial(_) => (StatusCode::CONFLICT, "NO_ACTIVE_TRIAL"),
                E::SequenceExhausted => (StatusCode::CONFLICT, "SEQUENCE_EXHAUSTED"),
                E::SessionClosed => (StatusCode::GONE, "SESSION_CLOSED"),
                E::Export { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED"),
                E::InvalidCorpus { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_CORPUS"),
                E::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.parts();
        let message = match &self {
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Session(err) => err.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("{}: {}", error_code, message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
