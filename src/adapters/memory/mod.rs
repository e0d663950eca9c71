//! In-memory adapters.
//!
//! Used by tests and for comparing the snapshot path against a store that
//! holds the same data.

pub mod item_repository;

pub use item_repository::InMemoryItemRepository;
