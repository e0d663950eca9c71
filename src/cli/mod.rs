//! Command-line interface
//!
//! `item-catalog [--config <path>] run api`

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::run::{RunArgs, RunCommand};

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(name = "item-catalog")]
#[command(about = "Read-only item catalog lookup service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to catalog.yaml in the working directory)
    #[arg(short, long, global = true, env = "CATALOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a catalog server
    Run(RunArgs),
}

/// Print an error chain to stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("Error: {err}");
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_api() {
        let cli = Cli::try_parse_from(["item-catalog", "run", "api"]).unwrap();
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Commands::Run(RunArgs { command: RunCommand::Api })));
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["item-catalog", "--config", "/etc/catalog.yaml", "run", "api"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/catalog.yaml")));

        let cli = Cli::try_parse_from(["item-catalog", "run", "api", "-c", "local.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("local.yaml")));
    }

    #[test]
    fn test_run_requires_target() {
        assert!(Cli::try_parse_from(["item-catalog", "run"]).is_err());
        assert!(Cli::try_parse_from(["item-catalog", "run", "worker"]).is_err());
    }
}
