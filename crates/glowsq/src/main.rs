mod cli;
mod commands;
mod error;
mod server;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, LogFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(
        cli.global.verbose,
        cli.global.log_format,
        cli.command.is_long_running(),
    );

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `RUST_LOG` wins; otherwise verbosity picks the level. Logs go to stderr
/// so `once` can pipe its JSON.
fn init_tracing(verbosity: u8, format: LogFormat, long_running: bool) {
    let filter = match verbosity {
        0 if !long_running => "warn",
        0 | 1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a controller connection
        Command::Config(args) => commands::config_cmd::handle(&args, &cli.global),
        Command::Once(args) => commands::once::handle(&args, &cli.global).await,
        Command::Serve(args) => commands::serve::handle(&args, &cli.global).await,
    }
}
