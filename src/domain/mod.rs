//! Domain layer for the item catalog
//!
//! This module contains the catalog models, the store port and the error
//! taxonomy shared by every other layer.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ListItemsError, StoreError, StoreResult, ValidationError};
