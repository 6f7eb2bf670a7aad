//! Filter and sort: catalog + criteria + sort direction → working set.
//!
//! Both steps are pure. Filtering keeps catalog order; sorting is a stable
//! sort on rating, so equal ratings always stay in catalog order regardless of
//! direction. Re-deriving with the same inputs always yields the same sequence.

use crate::catalog::Catalog;
use crate::types::{FilterCriteria, ImageRecord, SortState, WorkingSet};
use std::cmp::Ordering;

/// Whether a record satisfies the criteria.
///
/// Category is an exact match; search is a case-insensitive substring of the
/// title. Empty values impose no constraint.
pub fn matches(record: &ImageRecord, criteria: &FilterCriteria) -> bool {
    let category_ok = criteria.category.is_empty() || record.category == criteria.category;
    let search_ok = criteria.search.is_empty()
        || record
            .title
            .to_lowercase()
            .contains(&criteria.search.to_lowercase());
    category_ok && search_ok
}

/// Catalog positions of matching records, in display order.
pub fn derive_positions(
    catalog: &Catalog,
    criteria: &FilterCriteria,
    sort: SortState,
) -> Vec<usize> {
    let records = catalog.records();
    let mut positions: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, criteria))
        .map(|(i, _)| i)
        .collect();
    positions.sort_by(|&a, &b| compare_ratings(&records[a], &records[b], sort));
    tracing::debug!(
        category = %criteria.category,
        search = %criteria.search,
        ascending = sort.ascending,
        matched = positions.len(),
        "derived working set"
    );
    positions
}

/// Derive the working set for the given criteria and sort direction.
pub fn derive<'a>(
    catalog: &'a Catalog,
    criteria: &FilterCriteria,
    sort: SortState,
) -> WorkingSet<'a> {
    let records = catalog.records();
    WorkingSet::new(
        derive_positions(catalog, criteria, sort)
            .into_iter()
            .map(|i| &records[i])
            .collect(),
    )
}

/// Re-sort an existing working set. Stable, like [`derive`].
pub fn sort_working_set<'a>(set: &WorkingSet<'a>, sort: SortState) -> WorkingSet<'a> {
    let mut records = set.records().to_vec();
    records.sort_by(|a, b| compare_ratings(a, b, sort));
    WorkingSet::new(records)
}

fn compare_ratings(a: &ImageRecord, b: &ImageRecord, sort: SortState) -> Ordering {
    if sort.ascending {
        a.rating.total_cmp(&b.rating)
    } else {
        b.rating.total_cmp(&a.rating)
    }
}
