//! Hierarchical configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "catalog.yaml";

/// Optional local overrides, merged over the project file.
pub const LOCAL_CONFIG_FILE: &str = "catalog.local.yaml";

/// Prefix for environment overrides, e.g. `CATALOG_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "CATALOG_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file named explicitly does not exist.
    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// `server.port` is zero.
    #[error("Invalid port: {0}. Must be non-zero")]
    InvalidPort(u16),

    /// `server.request_timeout_secs` is zero.
    #[error("Invalid request timeout: {0}s. Must be positive")]
    InvalidRequestTimeout(u64),

    /// `logging.level` is not a known level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `logging.format` is not a known format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// `logging.rotation` is not a known policy.
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    /// `database.path` is empty.
    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    /// `database.max_connections` is zero.
    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    /// `listing.max_limit` is zero.
    #[error("Invalid max_limit: {0}. Must be at least 1")]
    InvalidMaxLimit(usize),

    /// `listing.default_limit` is outside `1..=max_limit`.
    #[error("Invalid default_limit: {default_limit}. Must be between 1 and {max_limit}")]
    InvalidDefaultLimit {
        /// Configured default limit.
        default_limit: usize,
        /// Configured maximum limit.
        max_limit: usize,
    },

    /// `listing.max_item_ids` is zero.
    #[error("Invalid max_item_ids: {0}. Must be at least 1")]
    InvalidMaxItemIds(usize),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `catalog.yaml`
    /// 3. `catalog.local.yaml` (optional)
    /// 4. Environment variables (`CATALOG_*`, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        Self::merge_layers(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load with `path` in place of the default project file.
    ///
    /// Unlike the implicit `catalog.yaml`, a named file must exist. Local
    /// overrides and environment variables still apply.
    pub fn load_layered(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        require_file(path)?;
        Self::merge_layers(path)
    }

    fn merge_layers(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        require_file(path)?;

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
            .context(format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Server
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        if config.server.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidRequestTimeout(
                config.server.request_timeout_secs,
            ));
        }

        // Database
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        // Logging
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        // Listing bounds
        let listing = &config.listing;
        if listing.max_limit == 0 {
            return Err(ConfigError::InvalidMaxLimit(listing.max_limit));
        }

        if listing.default_limit == 0 || listing.default_limit > listing.max_limit {
            return Err(ConfigError::InvalidDefaultLimit {
                default_limit: listing.default_limit,
                max_limit: listing.max_limit,
            });
        }

        if listing.max_item_ids == 0 {
            return Err(ConfigError::InvalidMaxItemIds(listing.max_item_ids));
        }

        Ok(())
    }
}

fn require_file(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound(path.to_path_buf()))
    }
}
