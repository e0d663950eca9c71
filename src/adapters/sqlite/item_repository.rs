//! SQLite implementation of the ItemRepository.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashSet;

use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::models::{Item, Page, PageMetadata};
use crate::domain::ports::ItemRepository;

const ITEM_COLUMNS: &str = "id, name, category, description";

/// Item store backed by the `items` table.
#[derive(Clone)]
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> StoreResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, name, category, description FROM items ORDER BY rowid"
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "loaded all items");
        Ok(rows.into_iter().map(Item::from).collect())
    }

    #[tracing::instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn find_by_ids(&self, ids: &[String], limit: usize, offset: usize) -> StoreResult<Page<Item>> {
        let ids = dedup_preserving_order(ids);
        if ids.is_empty() {
            return Ok(Page::empty(limit, offset));
        }

        // Count and page on one connection inside a read transaction so both
        // queries observe the same data.
        let mut tx = self.pool.begin().await?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM items WHERE id IN (");
        push_id_list(&mut count_query, &ids);
        let (total,): (i64,) = count_query.build_query_as().fetch_one(&mut *tx).await?;

        let mut select_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {ITEM_COLUMNS} FROM items WHERE id IN ("));
        push_id_list(&mut select_query, &ids);
        select_query
            .push(" ORDER BY rowid LIMIT ")
            .push_bind(to_sql_int(limit))
            .push(" OFFSET ")
            .push_bind(to_sql_int(offset));
        let rows: Vec<ItemRow> = select_query.build_query_as().fetch_all(&mut *tx).await?;

        tx.commit().await?;

        let total = usize::try_from(total)
            .map_err(|e| StoreError::Serialization(format!("Invalid item count {total}: {e}")))?;

        tracing::debug!(total, returned = rows.len(), "filtered item lookup");
        Ok(Page::new(
            rows.into_iter().map(Item::from).collect(),
            PageMetadata::new(limit, offset, total),
        ))
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
fn dedup_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Append `?, ?, ...)` binding each id.
fn push_id_list(query: &mut QueryBuilder<'_, Sqlite>, ids: &[String]) {
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(id.clone());
    }
    separated.push_unseparated(")");
}

/// SQLite integers are signed 64-bit; saturate larger paging values.
fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    category: Option<String>,
    description: Option<String>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            description: row.description,
        }
    }
}
