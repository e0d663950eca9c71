//! Item listing service.
//!
//! Unfiltered listings page over the startup snapshot; listings narrowed to
//! specific ids are delegated to the store, which counts and pages the
//! filtered set itself. Both paths return the same `Page<Item>` shape.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::adapters::cache::ItemSnapshot;
use crate::domain::errors::ListItemsError;
use crate::domain::models::{paginate, Item, ListItemsRequest, ListItemsResult};
use crate::domain::ports::ItemRepository;

/// Lists items from the snapshot or the store.
#[derive(Debug)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    snapshot: Arc<ItemSnapshot>,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a service over `repository` and its startup `snapshot`.
    pub fn new(repository: Arc<R>, snapshot: Arc<ItemSnapshot>) -> Self {
        Self { repository, snapshot }
    }

    /// The snapshot this service pages over.
    pub fn snapshot(&self) -> &ItemSnapshot {
        &self.snapshot
    }

    /// List one page of items.
    ///
    /// With no `item_ids` the candidate set is the whole snapshot. Otherwise
    /// the store filters, counts and pages the requested ids. Store failures
    /// fail the whole call; nothing is retried and no partial page is
    /// returned. A cancelled `cancel` token aborts the store lookup and drops
    /// its in-flight query.
    #[tracing::instrument(
        skip(self, request, cancel),
        fields(
            filtered = request.is_filtered(),
            requested = request.item_ids.len(),
            offset = request.offset,
            limit = request.limit,
        )
    )]
    pub async fn list_items(
        &self,
        request: &ListItemsRequest,
        cancel: &CancellationToken,
    ) -> Result<ListItemsResult, ListItemsError> {
        if cancel.is_cancelled() {
            return Err(ListItemsError::Cancelled);
        }

        if !request.is_filtered() {
            return Ok(self.list_from_snapshot(request.offset, request.limit));
        }

        let lookup = self
            .repository
            .find_by_ids(&request.item_ids, request.limit, request.offset);

        let page = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("filtered lookup cancelled");
                return Err(ListItemsError::Cancelled);
            }
            result = lookup => result.map_err(|err| {
                tracing::warn!(error = %err, "filtered item lookup failed");
                ListItemsError::Upstream(err)
            })?,
        };

        Ok(page)
    }

    fn list_from_snapshot(&self, offset: usize, limit: usize) -> ListItemsResult {
        paginate(self.snapshot.ordered_items(), offset, limit).map(|item| Item::clone(item))
    }
}
