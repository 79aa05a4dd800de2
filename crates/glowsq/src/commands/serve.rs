//! HTTP server for the display.

use tracing::info;

use crate::cli::{GlobalOpts, ServeArgs};
use crate::commands;
use crate::error::CliError;
use crate::server::{self, AppState};

pub async fn handle(args: &ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = commands::load(global)?;
    let (profile, controller) = commands::controller_for(&cfg, global)?;
    let bind = args.bind.unwrap_or(cfg.server.bind);

    let state = AppState::new(controller, cfg.graph, cfg.clock.zone);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|source| CliError::Bind {
            addr: bind.to_string(),
            source,
        })?;
    let local = listener.local_addr()?;
    info!(addr = %local, profile = %profile, "serving display stats");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
