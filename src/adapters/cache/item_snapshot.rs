//! Immutable snapshot of every catalog item.
//!
//! Holds the items in storage order alongside an id index. Both views are
//! built together and never change afterwards, so readers need no locking.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::errors::StoreError;
use crate::domain::models::Item;
use crate::domain::ports::ItemRepository;

/// Failure to build the snapshot from the store.
#[derive(Debug, Error)]
#[error("Failed to load item snapshot: {0}")]
pub struct SnapshotLoadError(#[from] pub StoreError);

/// Read-only, point-in-time copy of all items.
#[derive(Debug, Default)]
pub struct ItemSnapshot {
    items: Vec<Arc<Item>>,
    /// Item id -> position in `items`.
    index: HashMap<String, usize>,
}

impl ItemSnapshot {
    /// Load every item from `repository` with a single `find_all` call.
    #[tracing::instrument(skip(repository))]
    pub async fn load<R>(repository: &R) -> Result<Self, SnapshotLoadError>
    where
        R: ItemRepository + ?Sized,
    {
        let items = repository.find_all().await?;
        let snapshot = Self::from_items(items);
        tracing::info!(items = snapshot.len(), "item snapshot loaded");
        Ok(snapshot)
    }

    /// Build a snapshot from items in storage order.
    ///
    /// A repeated id replaces the earlier item in place: the last value wins
    /// and keeps the position of the first occurrence.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Item>,
    {
        let mut snapshot = Self::default();

        for item in items {
            if let Some(&position) = snapshot.index.get(&item.id) {
                tracing::warn!(id = %item.id, "duplicate item id in store, keeping last value");
                snapshot.items[position] = Arc::new(item);
                continue;
            }

            snapshot.index.insert(item.id.clone(), snapshot.items.len());
            snapshot.items.push(Arc::new(item));
        }

        snapshot
    }

    /// All items in storage order.
    pub fn ordered_items(&self) -> &[Arc<Item>] {
        &self.items
    }

    /// Look up an item by id.
    pub fn by_id(&self, id: &str) -> Option<&Arc<Item>> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store held no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
