//! Listing request and result types.

use serde::{Deserialize, Serialize};

use super::config::ListingConfig;
use super::item::Item;
use super::page::Page;
use crate::domain::errors::ValidationError;

/// A request to list catalog items.
///
/// An empty `item_ids` means "browse everything"; otherwise only the named
/// items form the candidate set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemsRequest {
    /// Ids to narrow the listing to; empty lists everything.
    #[serde(default)]
    pub item_ids: Vec<String>,
    /// Number of candidate items to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum number of items in the page.
    pub limit: usize,
}

impl ListItemsRequest {
    /// An unfiltered request for one window.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            item_ids: Vec::new(),
            offset,
            limit,
        }
    }

    /// Narrow the request to the given ids.
    pub fn with_item_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the request narrows the candidate set to specific items.
    pub fn is_filtered(&self) -> bool {
        !self.item_ids.is_empty()
    }

    /// Check the request against the configured bounds.
    pub fn validate(&self, limits: &ListingConfig) -> Result<(), ValidationError> {
        if self.item_ids.len() > limits.max_item_ids {
            return Err(ValidationError::TooManyItemIds {
                count: self.item_ids.len(),
                max: limits.max_item_ids,
            });
        }

        if self.item_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ValidationError::EmptyItemId);
        }

        if self.limit == 0 || self.limit > limits.max_limit {
            return Err(ValidationError::LimitOutOfRange {
                limit: self.limit,
                max: limits.max_limit,
            });
        }

        Ok(())
    }
}

/// The page of items returned for a listing.
pub type ListItemsResult = Page<Item>;
