//! Item catalog entry point.

use anyhow::{Context, Result};
use clap::Parser;

use item_catalog::cli::{commands, handle_error, Cli, Commands};
use item_catalog::infrastructure::config::ConfigLoader;
use item_catalog::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        handle_error(err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_layered(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, config).await,
    }
}
