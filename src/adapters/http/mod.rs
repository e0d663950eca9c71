//! HTTP transport for the catalog.

pub mod items_http;

pub use items_http::{ItemsHttpConfig, ItemsHttpServer, ListItemsResponse};
