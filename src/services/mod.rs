//! Service layer: use-case orchestration over the domain ports.

pub mod item_service;

pub use item_service::ItemService;
