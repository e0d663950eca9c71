//! Infrastructure layer module
//!
//! Process-level concerns that sit outside the domain:
//! - Configuration management
//! - Logging infrastructure
//! - Startup wiring

pub mod config;
pub mod logging;
pub mod setup;

pub use setup::{bootstrap, Catalog, StartupError};
