//! Clap derive structures for the `glowsq` binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// glowsq -- UniFi traffic and client stats for Glowing Square displays
#[derive(Debug, Parser)]
#[command(
    name = "glowsq",
    version,
    about = "Serve UniFi network stats to a Glowing Square LED display",
    long_about = "Logs in to a UniFi controller, aggregates connected clients and WAN\n\
        traffic, and serves the result as a compact JSON document sized for\n\
        a small LED matrix.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "GLOWSQ_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Controller profile to use
    #[arg(long, short = 'p', env = "GLOWSQ_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, env = "GLOWSQ_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP endpoint polled by the display
    Serve(ServeArgs),

    /// Fetch one summary and print it as JSON
    Once(OnceArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

impl Command {
    /// Long-running commands log at `info` even without `-v`.
    pub fn is_long_running(&self) -> bool {
        matches!(self, Self::Serve(_))
    }
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides [server] bind)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,
}

#[derive(Debug, Args)]
pub struct OnceArgs {
    /// Display width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Display height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective configuration with secrets redacted
    Show,
}
