// ── Runtime connection configuration ──
//
// These types describe *how* to reach a UniFi controller and which clock
// the monthly totals follow. They carry credential data and connection
// tuning, but never touch disk. The binary builds a `ControllerConfig`
// from `glowsq-config` and hands it in.

use std::time::Duration;

use chrono::{DateTime, Datelike, Local, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Which legacy API layout to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformHint {
    /// Probe the controller on every session.
    #[default]
    Auto,
    /// UniFi OS console (UDM, UCG, Cloud Key Gen2+).
    UnifiOs,
    /// Self-hosted Network Application.
    Classic,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for local controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Time zone used to place daily stats and "now" on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockZone {
    /// The server's local time zone.
    #[default]
    Local,
    Utc,
}

impl ClockZone {
    /// Current calendar month (1-12).
    pub fn current_month(self) -> u32 {
        match self {
            Self::Local => Local::now().month(),
            Self::Utc => Utc::now().month(),
        }
    }

    /// Calendar month (1-12) of a Unix-millisecond timestamp, or `None`
    /// when the timestamp is out of range.
    pub fn month_of_millis(self, timestamp_ms: i64) -> Option<u32> {
        let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
        Some(match self {
            Self::Local => utc.with_timezone(&Local).month(),
            Self::Utc => utc.month(),
        })
    }
}

/// Configuration for connecting to a single controller.
///
/// Built by the binary and passed to `Controller` -- core never reads
/// config files.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Legacy API account. A read-only "viewer" admin is enough.
    pub username: String,
    pub password: SecretString,
    /// Site to report on (defaults to "default").
    pub site: String,
    pub platform: PlatformHint,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}
