//! Configuration for the glowsq server.
//!
//! TOML profiles, credential resolution (env + plaintext), and
//! translation to `glowsq_core::ControllerConfig`. The binary layers
//! its global flags on top.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use glowsq_core::{
    ClockZone, ControllerConfig, DEFAULT_GRAPH_HEIGHT, DEFAULT_GRAPH_WIDTH, GraphOptions,
    GraphScale, PlatformHint, TlsVerification,
};

/// Placeholder written over secrets by [`Config::redacted`].
pub const REDACTED: &str = "********";

const ENV_PREFIX: &str = "GLOWSQ_";
const USERNAME_ENV: &str = "GLOWSQ_USERNAME";
const PASSWORD_ENV: &str = "GLOWSQ_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no profile selected and no default_profile configured")]
    NoProfile,

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub graph: GraphSection,

    #[serde(default)]
    pub clock: ClockSection,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Graph defaults applied when a request leaves `width`/`height` out.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GraphSection {
    #[serde(default = "default_width")]
    pub default_width: usize,

    #[serde(default = "default_height")]
    pub default_height: u32,

    /// Minimum rx bytes the vertical scale represents.
    #[serde(default)]
    pub floor_rx: u64,

    /// Minimum tx bytes the vertical scale represents.
    #[serde(default)]
    pub floor_tx: u64,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            default_height: default_height(),
            floor_rx: 0,
            floor_tx: 0,
        }
    }
}

impl GraphSection {
    pub fn scale(&self) -> GraphScale {
        GraphScale {
            floor_rx: self.floor_rx,
            floor_tx: self.floor_tx,
        }
    }

    /// Graph options built from the configured defaults.
    pub fn options(&self) -> GraphOptions {
        GraphOptions {
            width: self.default_width,
            height: self.default_height,
            scale: self.scale(),
        }
    }
}

fn default_width() -> usize {
    DEFAULT_GRAPH_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_GRAPH_HEIGHT
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct ClockSection {
    #[serde(default)]
    pub zone: ClockZone,
}

/// A named controller profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Controller base URL (e.g., "https://192.168.1.1").
    pub controller: String,

    #[serde(default = "default_site")]
    pub site: String,

    #[serde(default)]
    pub platform: PlatformHint,

    /// Username for the legacy API session.
    pub username: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Password (plaintext, prefer `password_env`).
    pub password: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_site() -> String {
    "default".into()
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Config {
    /// Pick the profile to use: the named one, then `default_profile`,
    /// then the only profile if there is exactly one.
    pub fn select_profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = match name.or(self.default_profile.as_deref()) {
            Some(name) => name,
            None => match self.profiles.iter().next() {
                Some((only, _)) if self.profiles.len() == 1 => only.as_str(),
                _ => return Err(ConfigError::NoProfile),
            },
        };

        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// Copy of the config with every plaintext secret masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for profile in copy.profiles.values_mut() {
            if profile.password.is_some() {
                profile.password = Some(REDACTED.into());
            }
        }
        copy
    }

    /// Render as TOML with secrets masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "glowsq", "glowsq").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("glowsq");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
///
/// An explicit `path` must exist; the default location may be absent,
/// in which case only defaults and environment apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(explicit) if !explicit.exists() => {
            return Err(ConfigError::NotFound {
                path: explicit.to_path_buf(),
            });
        }
        Some(explicit) => explicit.to_path_buf(),
        None => config_path(),
    };

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["profile", "username", "password"])
                .split("__"),
        );

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve username + password from the profile and process environment.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    resolve_credentials_with(profile, profile_name, |key| std::env::var(key).ok())
}

/// Credential chain with an injectable environment lookup.
///
/// Username: profile, then `GLOWSQ_USERNAME`. Password: the variable
/// named by `password_env`, then `GLOWSQ_PASSWORD`, then plaintext.
pub fn resolve_credentials_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(String, SecretString), ConfigError> {
    let missing = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    let username = profile
        .username
        .clone()
        .or_else(|| env(USERNAME_ENV))
        .ok_or_else(missing)?;

    // 1. Profile's password_env
    if let Some(pw) = profile.password_env.as_deref().and_then(&env) {
        return Ok((username, SecretString::from(pw)));
    }

    // 2. Global env var
    if let Some(pw) = env(PASSWORD_ENV) {
        return Ok((username, SecretString::from(pw)));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(missing())
}

/// TLS strategy for a profile.
pub fn tls_for(profile: &Profile) -> TlsVerification {
    match (profile.insecure, &profile.ca_cert) {
        // Unset means a local, self-signed controller.
        (Some(true), _) | (None, None) => TlsVerification::DangerAcceptInvalid,
        (_, Some(ca_path)) => TlsVerification::CustomCa(ca_path.clone()),
        (Some(false), None) => TlsVerification::SystemDefaults,
    }
}

/// Build a `ControllerConfig` from a profile.
pub fn profile_to_controller_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ControllerConfig, ConfigError> {
    let (username, password) = resolve_credentials(profile, profile_name)?;
    controller_config_from(profile, username, password)
}

fn controller_config_from(
    profile: &Profile,
    username: String,
    password: SecretString,
) -> Result<ControllerConfig, ConfigError> {
    let url: url::Url = profile
        .controller
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "controller".into(),
            reason: format!("invalid URL: {}", profile.controller),
        })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "controller".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }

    Ok(ControllerConfig {
        url,
        username,
        password,
        site: profile.site.clone(),
        platform: profile.platform,
        tls: tls_for(profile),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}
