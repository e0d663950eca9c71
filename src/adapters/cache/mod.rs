//! Process-lifetime item snapshot.
//!
//! Built once at startup from the store and shared read-only through an
//! `Arc`. There is no refresh or invalidation.

pub mod item_snapshot;

pub use item_snapshot::{ItemSnapshot, SnapshotLoadError};
