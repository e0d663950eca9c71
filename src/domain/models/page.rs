//! Offset/limit paging over ordered sequences.
//!
//! Two producers share [`PageMetadata`]: [`paginate`] slices an in-memory
//! sequence, and store adapters compute the same fields server-side. In
//! both cases `total` is the size of the candidate set and `has_next` is
//! derived from the raw, unclamped `offset + limit`.

use serde::{Deserialize, Serialize};

/// Page metadata echoed back with every listing.
///
/// All fields are optional so a "not computed" value can exist, but every
/// constructor in this crate populates all four together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Requested page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Requested number of skipped items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Size of the candidate set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Whether items remain past this window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
}

impl PageMetadata {
    /// Compute metadata for a window over a candidate set of `total` items.
    pub fn new(limit: usize, offset: usize, total: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            total: Some(total),
            has_next: Some(total > offset.saturating_add(limit)),
        }
    }

    /// Whether all four fields have been populated.
    pub fn is_computed(&self) -> bool {
        self.limit.is_some() && self.offset.is_some() && self.total.is_some() && self.has_next.is_some()
    }
}

/// A page of results together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in this window, in candidate order.
    pub items: Vec<T>,
    /// Paging metadata for the window.
    pub metadata: PageMetadata,
}

impl<T> Page<T> {
    /// Pair a window of items with its metadata.
    pub fn new(items: Vec<T>, metadata: PageMetadata) -> Self {
        Self { items, metadata }
    }

    /// An empty page over an empty candidate set.
    pub fn empty(limit: usize, offset: usize) -> Self {
        Self::new(Vec::new(), PageMetadata::new(limit, offset, 0))
    }

    /// Transform every item, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}

/// Slice `items` by offset and limit.
///
/// Both bounds are clamped to the sequence length, so an offset past the
/// end yields an empty page rather than an error.
pub fn paginate<T>(items: &[T], offset: usize, limit: usize) -> Page<&T> {
    let len = items.len();
    let start = offset.min(len);
    let end = offset.saturating_add(limit).min(len);

    Page {
        items: items[start..end].iter().collect(),
        metadata: PageMetadata::new(limit, offset, len),
    }
}
