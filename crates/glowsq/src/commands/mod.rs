//! Subcommand handlers plus the config → controller wiring they share.

pub mod config_cmd;
pub mod once;
pub mod serve;

use glowsq_config::{Config, ConfigError};
use glowsq_core::Controller;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config named by `--config`, or the default location.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(glowsq_config::load_config(global.config.as_deref())?)
}

/// Resolve the active profile and build a controller for it.
///
/// Returns the profile name alongside for logging.
pub fn controller_for(cfg: &Config, global: &GlobalOpts) -> Result<(String, Controller), CliError> {
    let (name, profile) = cfg
        .select_profile(global.profile.as_deref())
        .map_err(|err| match err {
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(cfg),
            },
            other => other.into(),
        })?;

    let controller_config = glowsq_config::profile_to_controller_config(profile, name)?;
    tracing::debug!(
        profile = name,
        url = %controller_config.url,
        site = %controller_config.site,
        "controller configured"
    );
    Ok((name.to_owned(), Controller::new(controller_config)))
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        return "(none)".into();
    }
    cfg.profiles.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
