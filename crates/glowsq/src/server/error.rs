//! Failed stats requests as JSON error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use glowsq_core::CoreError;

use super::json_response;

/// Error detail in the response body.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Core(CoreError::AuthenticationFailed { .. }) => {
                (StatusCode::BAD_GATEWAY, "AUTHENTICATION_FAILED")
            }
            Self::Core(CoreError::ConnectionFailed { .. }) => {
                (StatusCode::BAD_GATEWAY, "CONNECTION_FAILED")
            }
            Self::Core(CoreError::Timeout { .. }) => (StatusCode::BAD_GATEWAY, "TIMEOUT"),
            Self::Core(CoreError::Api { .. } | CoreError::Internal(_)) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            Self::Core(CoreError::Config { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            Self::Encode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::error!(error = %self, code, "stats request failed");

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message: self.to_string(),
            },
        };

        match serde_json::to_vec(&body) {
            Ok(bytes) => json_response(status, bytes),
            Err(_) => status.into_response(),
        }
    }
}
