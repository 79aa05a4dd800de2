//! One-shot summary for cron jobs and display debugging.

use crate::cli::{GlobalOpts, OnceArgs};
use crate::commands;
use crate::error::CliError;

pub async fn handle(args: &OnceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = commands::load(global)?;
    let (_, controller) = commands::controller_for(&cfg, global)?;

    let mut options = cfg.graph.options();
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }

    let summary = controller.summarize(&options, cfg.clock.zone).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
