//! Shared types passed between the catalog, engine, stats and view layers.
//!
//! [`ImageRecord`] is the only owned data; everything downstream of the
//! catalog borrows it. A [`WorkingSet`] is a borrowed, ordered view over the
//! catalog and is rebuilt from scratch whenever criteria or sort change.

use serde::{Deserialize, Serialize};

/// A single gallery entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: u32,
    pub title: String,
    /// May be blank in hand-written catalogs; blank categories are left out
    /// of the selector but the record is still shown and searchable.
    #[serde(default)]
    pub category: String,
    /// Star rating in `[0, 5]`.
    pub rating: f64,
    /// Display resource locator for the image.
    pub url: String,
}

/// Active category/search constraints. Empty strings mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: String,
    pub search: String,
}

impl FilterCriteria {
    pub fn new(category: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search: search.into(),
        }
    }
}

/// Rating sort direction. Descending (best first) unless toggled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub ascending: bool,
}

impl SortState {
    pub fn ascending() -> Self {
        Self { ascending: true }
    }

    pub fn descending() -> Self {
        Self { ascending: false }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        Self {
            ascending: !self.ascending,
        }
    }
}

/// Ordered, filtered view over catalog records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet<'a> {
    records: Vec<&'a ImageRecord>,
}

impl<'a> WorkingSet<'a> {
    pub fn new(records: Vec<&'a ImageRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a ImageRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ImageRecord> + '_ {
        self.records.iter().copied()
    }

    /// Record ids in display order.
    pub fn ids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.id).collect()
    }
}
