//! View-models: what the gallery shows, independent of how it is drawn.
//!
//! Everything here is a pure projection of a working set (plus the current
//! criteria and sort) into plain structs. Adapters in [`crate::html`] and
//! [`crate::output`] turn these into markup or terminal lines; neither adapter
//! makes decisions of its own about formatting ratings or empty states.

use crate::catalog::Catalog;
use crate::config::LabelsConfig;
use crate::stats::{self, Stats};
use crate::types::{FilterCriteria, ImageRecord, SortState, WorkingSet};

/// One grid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: u32,
    pub title: String,
    pub image_url: String,
    pub image_alt: String,
    /// Star-prefixed rating, e.g. `★4.5`.
    pub rating: String,
}

/// Contents of the grid region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Cards(Vec<CardView>),
    /// Shown instead of the grid when nothing matches.
    Empty { message: String },
}

impl GridView {
    pub fn is_empty(&self) -> bool {
        matches!(self, GridView::Empty { .. })
    }
}

/// The detail overlay for a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub id: u32,
    pub title: String,
    pub image_url: String,
    pub image_alt: String,
    pub category: String,
    pub rating: String,
    pub link_href: String,
    pub link_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    /// Empty for the "all categories" entry.
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Controls above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub sort_glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub count: String,
    pub average: String,
}

/// Everything needed to draw the full widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub toolbar: ToolbarView,
    pub stats: StatsView,
    pub grid: GridView,
    /// Detail overlay for every card, in grid order.
    pub details: Vec<OverlayView>,
    /// The overlay currently shown, if any.
    pub overlay: Option<OverlayView>,
}

/// Rating with a star prefix and one decimal place.
pub fn format_rating(rating: f64) -> String {
    format!("★{}", stats::one_decimal(rating))
}

/// Direction indicator for the sort toggle.
pub fn sort_glyph(sort: SortState) -> &'static str {
    if sort.ascending { "↑" } else { "↓" }
}

pub fn card(record: &ImageRecord) -> CardView {
    CardView {
        id: record.id,
        title: record.title.clone(),
        image_url: record.url.clone(),
        image_alt: record.title.clone(),
        rating: format_rating(record.rating),
    }
}

/// Project a working set into the grid region.
pub fn render(set: &WorkingSet<'_>, no_results: &str) -> GridView {
    if set.is_empty() {
        return GridView::Empty {
            message: no_results.to_string(),
        };
    }
    GridView::Cards(set.iter().map(card).collect())
}

pub fn render_overlay(record: &ImageRecord) -> OverlayView {
    OverlayView {
        id: record.id,
        title: record.title.clone(),
        image_url: record.url.clone(),
        image_alt: record.title.clone(),
        category: record.category.clone(),
        rating: format_rating(record.rating),
        link_href: record.url.clone(),
        link_text: record.url.clone(),
    }
}

/// Selector entries: the "all" option first, then sorted catalog categories.
/// A selected value the catalog does not contain marks no entry.
pub fn category_options(
    catalog: &Catalog,
    selected: &str,
    all_label: &str,
) -> Vec<CategoryOption> {
    let mut options = vec![CategoryOption {
        value: String::new(),
        label: all_label.to_string(),
        selected: selected.is_empty(),
    }];
    options.extend(catalog.categories().into_iter().map(|c| CategoryOption {
        value: c.to_string(),
        label: c.to_string(),
        selected: c == selected,
    }));
    options
}

pub fn render_toolbar(
    catalog: &Catalog,
    input: &FilterCriteria,
    sort: SortState,
    labels: &LabelsConfig,
) -> ToolbarView {
    ToolbarView {
        categories: category_options(catalog, &input.category, &labels.all_categories),
        search: input.search.clone(),
        sort_glyph: sort_glyph(sort),
    }
}

pub fn render_stats(stats: &Stats) -> StatsView {
    StatsView {
        count: stats.count.to_string(),
        average: stats.display_average(),
    }
}
