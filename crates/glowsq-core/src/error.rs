// ── Core error types ──
//
// User-facing errors from glowsq-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<glowsq_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<glowsq_api::Error> for CoreError {
    fn from(err: glowsq_api::Error) -> Self {
        match err {
            glowsq_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            glowsq_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            glowsq_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            // A CA bundle that cannot be loaded is our setup, not the controller.
            err @ glowsq_api::Error::CaCertificate { .. } => CoreError::Config {
                message: err.to_string(),
            },
            err @ glowsq_api::Error::Controller { .. } => CoreError::Api {
                message: err.to_string(),
                status: None,
            },
            err @ glowsq_api::Error::Payload { .. } => CoreError::Internal(err.to_string()),
        }
    }
}
