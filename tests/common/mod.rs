//! Common test utilities for integration tests
//!
//! Provides seeded SQLite stores and sample catalogs shared across
//! integration test files.

#![allow(dead_code)]

use std::sync::Arc;

use item_catalog::adapters::sqlite::create_migrated_test_pool;
use item_catalog::infrastructure::setup::build_service;
use item_catalog::{Item, ItemService, SqliteItemRepository};
use sqlx::SqlitePool;

/// `n` items named `item_1..=item_n`, every one with a description and
/// every other one with a category.
pub fn catalog_items(n: usize) -> Vec<Item> {
    (1..=n)
        .map(|i| {
            let item = Item::new(format!("item_{i}"), format!("Item {i}"))
                .with_description(format!("Description of item {i}"));
            if i % 2 == 0 {
                item.with_category("even")
            } else {
                item
            }
        })
        .collect()
}

/// Migrated in-memory database holding `items` in insertion order.
pub async fn seeded_pool(items: &[Item]) -> SqlitePool {
    let pool = create_migrated_test_pool()
        .await
        .expect("Failed to create test database");

    for item in items {
        sqlx::query("INSERT INTO items (id, name, category, description) VALUES (?, ?, ?, ?)")
            .bind(&item.id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(&item.description)
            .execute(&pool)
            .await
            .expect("Failed to insert item");
    }

    pool
}

/// Service over a SQLite store seeded with `items`.
pub async fn seeded_service(items: &[Item]) -> ItemService<SqliteItemRepository> {
    let pool = seeded_pool(items).await;
    build_service(Arc::new(SqliteItemRepository::new(pool)))
        .await
        .expect("Failed to load snapshot")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
