//! `run` commands: start a catalog server.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::adapters::http::{ItemsHttpConfig, ItemsHttpServer};
use crate::domain::models::Config;
use crate::infrastructure::setup;

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// What to run.
    #[command(subcommand)]
    pub command: RunCommand,
}

/// Runnable servers.
#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// Serve the items HTTP API until interrupted
    Api,
}

/// Run the selected server with `config`.
pub async fn execute(args: RunArgs, config: Config) -> Result<()> {
    match args.command {
        RunCommand::Api => run_api(config).await,
    }
}

async fn run_api(config: Config) -> Result<()> {
    let catalog = setup::bootstrap(&config)
        .await
        .context("Failed to start item catalog")?;

    let server = ItemsHttpServer::new(
        catalog.service,
        ItemsHttpConfig::from(&config.server),
        config.listing.clone(),
    );

    let result = server.serve_with_shutdown(shutdown_signal()).await;
    catalog.pool.close().await;

    result.map_err(|err| anyhow::anyhow!(err)).context("Items HTTP server failed")?;
    tracing::info!("item catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
