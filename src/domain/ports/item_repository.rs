//! Item repository port.

use async_trait::async_trait;

use crate::domain::errors::StoreResult;
use crate::domain::models::{Item, Page};

/// Read-only gateway to the persistent item store.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch every item in storage order.
    ///
    /// Called once at startup to build the item snapshot.
    async fn find_all(&self) -> StoreResult<Vec<Item>>;

    /// Fetch the items whose ids are in `ids`, paged server-side.
    ///
    /// The returned metadata describes the filtered set: `total` counts the
    /// matching items and `has_next` is `total > offset + limit`. Ids with
    /// no matching item are ignored.
    async fn find_by_ids(&self, ids: &[String], limit: usize, offset: usize) -> StoreResult<Page<Item>>;
}
