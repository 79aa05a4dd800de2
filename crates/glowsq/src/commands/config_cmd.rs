//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands;
use crate::error::CliError;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = global
                .config
                .clone()
                .unwrap_or_else(glowsq_config::config_path);
            println!("{}", path.display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = commands::load(global)?;
            print!("{}", cfg.to_redacted_toml()?);
            Ok(())
        }
    }
}
