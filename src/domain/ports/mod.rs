//! Port trait definitions.
//!
//! Adapters in `crate::adapters` implement these traits so the listing
//! service never depends on a concrete store.

pub mod item_repository;

pub use item_repository::ItemRepository;
