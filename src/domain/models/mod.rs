//! Domain models for the item catalog.

pub mod config;
pub mod item;
pub mod listing;
pub mod page;

pub use config::{Config, DatabaseConfig, ListingConfig, LoggingConfig, ServerConfig};
pub use item::Item;
pub use listing::{ListItemsRequest, ListItemsResult};
pub use page::{paginate, Page, PageMetadata};
