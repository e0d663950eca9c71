//! SQLite schema migrations embedded in the binary.

use sqlx::SqlitePool;
use thiserror::Error;

/// Errors applying schema migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A migration statement failed.
    #[error("Failed to execute migration {version}: {source}")]
    ExecutionError {
        /// Version of the failing migration.
        version: i64,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// The current schema version could not be read.
    #[error("Failed to get schema version: {0}")]
    VersionCheckError(#[source] sqlx::Error),
}

/// A numbered schema change.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Schema version reached after applying.
    pub version: i64,
    /// Short summary recorded in `schema_migrations`.
    pub description: String,
    /// Statements to execute.
    pub sql: String,
}

/// Applies pending migrations to a pool.
pub struct Migrator {
    pool: SqlitePool,
}

impl Migrator {
    /// Create a migrator for `pool`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every migration newer than the recorded schema version.
    ///
    /// Returns the number of migrations applied.
    pub async fn run_embedded_migrations(&self, migrations: Vec<Migration>) -> Result<usize, MigrationError> {
        self.ensure_migrations_table().await?;
        let current_version = self.get_current_version().await?;
        let pending: Vec<_> = migrations.into_iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            tracing::debug!(version = current_version, "schema up to date");
            return Ok(0);
        }

        for migration in &pending {
            self.apply_migration(migration).await?;
            tracing::info!(
                version = migration.version,
                description = %migration.description,
                "applied migration"
            );
        }

        Ok(pending.len())
    }

    async fn ensure_migrations_table(&self) -> Result<(), MigrationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now')),
                description TEXT
            )"
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MigrationError::ExecutionError { version: 0, source: e })?;
        Ok(())
    }

    /// Highest applied version, or 0 on a fresh database.
    pub async fn get_current_version(&self) -> Result<i64, MigrationError> {
        let result: Option<(i64,)> = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
            .fetch_optional(&self.pool)
            .await
            .map_err(MigrationError::VersionCheckError)?;
        Ok(result.map_or(0, |(v,)| v))
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), MigrationError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MigrationError::ExecutionError { version: migration.version, source: e })?;

        sqlx::raw_sql(&migration.sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| MigrationError::ExecutionError { version: migration.version, source: e })?;

        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| MigrationError::ExecutionError { version: migration.version, source: e })?;

        tx.commit()
            .await
            .map_err(|e| MigrationError::ExecutionError { version: migration.version, source: e })?;
        Ok(())
    }
}

/// Migration 1: the `items` table.
pub fn create_items_migration() -> Migration {
    Migration {
        version: 1,
        description: "Create items table".to_string(),
        sql: include_str!("../../../migrations/001_create_items.sql").to_string(),
    }
}

/// Every migration compiled into the binary, in order.
pub fn all_embedded_migrations() -> Vec<Migration> {
    vec![create_items_migration()]
}
