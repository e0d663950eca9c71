use item_catalog::{paginate, InMemoryItemRepository, Item, ItemRepository, ItemSnapshot};
use proptest::prelude::*;
use std::collections::HashSet;

fn items(n: usize) -> Vec<Item> {
    (0..n).map(|i| Item::new(format!("id_{i}"), format!("Item {i}"))).collect()
}

proptest! {
    /// Property: the page is exactly the clamped window of the input
    #[test]
    fn prop_page_is_clamped_window(
        values in prop::collection::vec(any::<u32>(), 0..64),
        offset in 0usize..100,
        limit in 0usize..100,
    ) {
        let page = paginate(&values, offset, limit);
        let n = values.len();
        let expected: Vec<&u32> = values[offset.min(n)..(offset + limit).min(n)].iter().collect();

        prop_assert_eq!(page.items, expected);
    }

    /// Property: total is always the input length and has_next uses the raw window end
    #[test]
    fn prop_metadata_is_unclamped(
        n in 0usize..64,
        offset in any::<usize>(),
        limit in any::<usize>(),
    ) {
        let values: Vec<usize> = (0..n).collect();
        let page = paginate(&values, offset, limit);

        prop_assert_eq!(page.metadata.total, Some(n));
        prop_assert_eq!(page.metadata.limit, Some(limit));
        prop_assert_eq!(page.metadata.offset, Some(offset));
        prop_assert_eq!(page.metadata.has_next, Some(n > offset.saturating_add(limit)));
        prop_assert!(page.items.len() <= limit);
    }

    /// Property: paging the same input twice gives the same page
    #[test]
    fn prop_paginate_is_idempotent(
        values in prop::collection::vec(any::<i64>(), 0..32),
        offset in 0usize..40,
        limit in 0usize..40,
    ) {
        prop_assert_eq!(paginate(&values, offset, limit), paginate(&values, offset, limit));
    }

    /// Property: consecutive pages cover the input exactly once
    #[test]
    fn prop_pages_partition_input(
        values in prop::collection::vec(any::<u8>(), 0..50),
        limit in 1usize..10,
    ) {
        let mut collected = Vec::new();
        let mut offset = 0;
        loop {
            let page = paginate(&values, offset, limit);
            collected.extend(page.items.into_iter().copied());
            if page.metadata.has_next != Some(true) {
                break;
            }
            offset += limit;
        }
        prop_assert_eq!(collected, values);
    }

    /// Property: the in-memory store and the snapshot agree on unfiltered pages
    #[test]
    fn prop_store_and_snapshot_agree(
        n in 0usize..30,
        offset in 0usize..40,
        limit in 1usize..20,
    ) {
        let items = items(n);
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        let snapshot = ItemSnapshot::from_items(items.clone());
        let repo = InMemoryItemRepository::new(items);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let stored = runtime.block_on(repo.find_by_ids(&ids, limit, offset)).unwrap();
        let cached = paginate(snapshot.ordered_items(), offset, limit).map(|item| Item::clone(item));

        prop_assert_eq!(stored, cached);
    }

    /// Property: filtered store pages only contain requested ids, in storage order
    #[test]
    fn prop_filtered_pages_respect_request(
        n in 1usize..30,
        requested in prop::collection::vec(0usize..40, 1..10),
        limit in 1usize..20,
    ) {
        let repo = InMemoryItemRepository::new(items(n));
        let ids: Vec<String> = requested.iter().map(|i| format!("id_{i}")).collect();
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let expected_total = requested.iter().collect::<HashSet<_>>().iter().filter(|i| ***i < n).count();

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let page = runtime.block_on(repo.find_by_ids(&ids, limit, 0)).unwrap();

        prop_assert_eq!(page.metadata.total, Some(expected_total));
        prop_assert!(page.items.iter().all(|item| wanted.contains(item.id.as_str())));

        let positions: Vec<usize> = page
            .items
            .iter()
            .map(|item| item.id.trim_start_matches("id_").parse().unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
