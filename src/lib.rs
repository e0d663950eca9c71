//! Item Catalog - read-only item lookup service
//!
//! Serves paginated listings of catalog items. Unfiltered listings are
//! answered from an immutable snapshot loaded once at startup; listings
//! narrowed to specific item ids are delegated to the SQLite store, which
//! filters, counts and pages them itself.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, pagination and the store port
//! - **Adapters** (`adapters`): SQLite and in-memory stores, the snapshot, HTTP
//! - **Service Layer** (`services`): Listing orchestration
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, startup
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use item_catalog::{bootstrap, Config, ListItemsRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = bootstrap(&Config::default()).await?;
//!     let page = catalog
//!         .service
//!         .list_items(&ListItemsRequest::new(0, 10), &CancellationToken::new())
//!         .await?;
//!     println!("{} of {:?}", page.items.len(), page.metadata.total);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::{ItemSnapshot, SnapshotLoadError};
pub use adapters::memory::InMemoryItemRepository;
pub use adapters::sqlite::SqliteItemRepository;
pub use domain::errors::{ListItemsError, StoreError, StoreResult, ValidationError};
pub use domain::models::{
    paginate, Config, DatabaseConfig, Item, ListItemsRequest, ListItemsResult, ListingConfig,
    LoggingConfig, Page, PageMetadata, ServerConfig,
};
pub use domain::ports::ItemRepository;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::setup::{bootstrap, Catalog, StartupError};
pub use services::ItemService;
