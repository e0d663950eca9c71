//! Service startup wiring.
//!
//! Opens the database, brings the schema up to date, loads the item snapshot
//! and assembles the listing service. Any failure here is fatal: the process
//! must not serve traffic without a complete snapshot.

use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::cache::ItemSnapshot;
use crate::adapters::sqlite::{initialize_database, DatabaseError, PoolConfig, SqliteItemRepository};
use crate::domain::errors::StoreError;
use crate::domain::models::Config;
use crate::domain::ports::ItemRepository;
use crate::infrastructure::config::{ConfigError, ConfigLoader};
use crate::services::ItemService;

/// Fatal errors while starting the catalog.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The database could not be opened or migrated.
    #[error("Database initialization failed: {0}")]
    Database(#[from] DatabaseError),

    /// The item snapshot could not be loaded.
    #[error("Failed to load item cache: {0}")]
    CacheLoad(#[source] StoreError),
}

/// A fully wired catalog backed by SQLite.
pub struct Catalog {
    /// Shared connection pool.
    pub pool: SqlitePool,
    /// Listing service over the loaded snapshot.
    pub service: ItemService<SqliteItemRepository>,
}

/// Build the catalog described by `config`.
#[tracing::instrument(skip(config), fields(database = %config.database.path))]
pub async fn bootstrap(config: &Config) -> Result<Catalog, StartupError> {
    ConfigLoader::validate(config)?;

    let pool = initialize_database(
        &config.database.url(),
        Some(PoolConfig::from(&config.database)),
    )
    .await?;

    let repository = Arc::new(SqliteItemRepository::new(pool.clone()));
    let service = build_service(repository).await?;

    Ok(Catalog { pool, service })
}

/// Load the snapshot from `repository` and wrap both in a service.
pub async fn build_service<R: ItemRepository>(repository: Arc<R>) -> Result<ItemService<R>, StartupError> {
    let snapshot = ItemSnapshot::load(repository.as_ref())
        .await
        .map_err(|err| StartupError::CacheLoad(err.0))?;

    tracing::info!(cached_items = snapshot.len(), "item catalog ready");

    Ok(ItemService::new(repository, Arc::new(snapshot)))
}
