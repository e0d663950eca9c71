//! Domain errors for the item catalog.

use thiserror::Error;

/// Errors raised by a persistent store gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected or failed the query.
    #[error("Query failed: {0}")]
    Query(String),

    /// A stored value could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Serialization(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Errors surfaced by the listing service.
#[derive(Debug, Error)]
pub enum ListItemsError {
    /// The identifier-filtered lookup failed in the store.
    #[error("Upstream store failure: {0}")]
    Upstream(#[from] StoreError),

    /// The caller abandoned the request before it completed.
    #[error("Request cancelled")]
    Cancelled,
}

/// Request validation failures, raised before the service is called.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// More item ids than the configured maximum.
    #[error("Too many item ids: {count} (max {max})")]
    TooManyItemIds {
        /// Number of ids supplied.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Limit outside `1..=max`.
    #[error("Invalid limit: {limit}. Must be between 1 and {max}")]
    LimitOutOfRange {
        /// Requested limit.
        limit: usize,
        /// Configured maximum.
        max: usize,
    },

    /// An item id was blank.
    #[error("Item ids cannot be empty strings")]
    EmptyItemId,
}
