//! In-memory implementation of the ItemRepository.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::errors::StoreResult;
use crate::domain::models::{paginate, Item, Page};
use crate::domain::ports::ItemRepository;

/// An item store backed by a `Vec`, in storage order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Vec<Item>,
}

impl InMemoryItemRepository {
    /// Store `items` in the given order.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.clone())
    }

    async fn find_by_ids(&self, ids: &[String], limit: usize, offset: usize) -> StoreResult<Page<Item>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let matching: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| wanted.contains(item.id.as_str()))
            .collect();

        Ok(paginate(&matching, offset, limit).map(|item| (*item).clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryItemRepository {
        InMemoryItemRepository::new(
            (1..=5)
                .map(|i| Item::new(format!("item_{i}"), format!("Item {i}")))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_find_all_keeps_order() {
        let items = repo().find_all().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["item_1", "item_2", "item_3", "item_4", "item_5"]);
    }

    #[tokio::test]
    async fn test_find_by_ids_uses_storage_order() {
        let ids = vec!["item_5".to_string(), "item_1".to_string(), "item_3".to_string()];
        let page = repo().find_by_ids(&ids, 2, 0).await.unwrap();

        let got: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(got, vec!["item_1", "item_3"]);
        assert_eq!(page.metadata.total, Some(3));
        assert_eq!(page.metadata.has_next, Some(true));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_ignored() {
        let ids = vec!["missing".to_string(), "item_2".to_string()];
        let page = repo().find_by_ids(&ids, 10, 0).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.metadata.total, Some(1));
    }
}
