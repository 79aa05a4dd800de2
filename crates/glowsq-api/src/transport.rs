// HTTP client construction.
//
// Each session builds its own `reqwest::Client` with a private cookie
// store, so no cookie ever leaks from one display request to the next.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("glowsq/", env!("CARGO_PKG_VERSION"));

/// How the controller's certificate is checked.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// System trust store.
    System,
    /// Trust the PEM bundle at this path in addition to the system store.
    CustomCa(PathBuf),
    /// Accept anything; controllers ship self-signed certificates.
    DangerAcceptInvalid,
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a client with its own cookie store.
    ///
    /// CA problems surface as [`Error::CaCertificate`], whether the file
    /// is unreadable or rustls rejects its contents at build time.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => builder.build().map_err(Error::from),
            TlsMode::DangerAcceptInvalid => builder
                .danger_accept_invalid_certs(true)
                .build()
                .map_err(Error::from),
            TlsMode::CustomCa(path) => {
                let cert = load_ca(path)?;
                builder
                    .add_root_certificate(cert)
                    .build()
                    .map_err(|e| ca_error(path, &e))
            }
        }
    }
}

fn load_ca(path: &Path) -> Result<reqwest::Certificate, Error> {
    let pem = std::fs::read(path).map_err(|e| ca_error(path, &e))?;
    reqwest::Certificate::from_pem(&pem).map_err(|e| ca_error(path, &e))
}

fn ca_error(path: &Path, reason: &impl std::fmt::Display) -> Error {
    Error::CaCertificate {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
