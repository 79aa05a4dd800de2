use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while talking to the controller.
///
/// Controller-side failures name the endpoint they came from so a log
/// line is enough to tell a failed login from a failed report.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials refused, or the session cookie was not accepted.
    #[error("authentication rejected: {message}")]
    Authentication { message: String },

    #[error("request to controller failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid controller URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured CA bundle could not be read or parsed.
    #[error("cannot use CA certificate {}: {reason}", path.display())]
    CaCertificate { path: PathBuf, reason: String },

    /// The controller answered, but not with `rc = ok`.
    #[error("{endpoint}: {message}")]
    Controller { endpoint: String, message: String },

    /// The reply was not the JSON we expected. `body` is the full text.
    #[error("{endpoint}: unexpected payload: {message}")]
    Payload {
        endpoint: String,
        message: String,
        body: String,
    },
}
