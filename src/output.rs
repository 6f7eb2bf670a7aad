//! Terminal adapter: view-models → display lines.
//!
//! # Output Format
//!
//! ```text
//! Категория: Города | "" | Рейтинг ↓
//! Всего: 3    Средний рейтинг: 4.6
//! 001 Городской парк ★4.9
//!     Id: 7
//! 002 Небоскребы ★4.6
//!     Id: 6
//! ```
//!
//! The overlay prints as a title line with indented detail lines. Each region
//! has a `format_*` function returning `Vec<String>` for testability;
//! [`print_lines`] writes them to stdout. Format functions are pure.

use crate::config::LabelsConfig;
use crate::controller::Refresh;
use crate::view::{GridView, OverlayView, PageView, StatsView, ToolbarView};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Regions
// ============================================================================

/// Selector entries, one per line, selected entry marked with `*`.
pub fn format_categories(toolbar: &ToolbarView) -> Vec<String> {
    toolbar
        .categories
        .iter()
        .map(|o| {
            let marker = if o.selected { "*" } else { " " };
            format!("{} {}", marker, o.label)
        })
        .collect()
}

pub fn format_toolbar(toolbar: &ToolbarView, labels: &LabelsConfig) -> Vec<String> {
    let category = toolbar
        .categories
        .iter()
        .find(|o| o.selected)
        .map(|o| o.label.as_str())
        .unwrap_or("");
    vec![format!(
        "{}: {} | {:?} | {} {}",
        labels.category, category, toolbar.search, labels.sort, toolbar.sort_glyph
    )]
}

pub fn format_stats(stats: &StatsView, labels: &LabelsConfig) -> Vec<String> {
    vec![format!(
        "{}: {}    {}: {}",
        labels.count, stats.count, labels.average, stats.average
    )]
}

pub fn format_grid(grid: &GridView) -> Vec<String> {
    match grid {
        GridView::Empty { message } => vec![message.clone()],
        GridView::Cards(cards) => cards
            .iter()
            .enumerate()
            .flat_map(|(i, card)| {
                [
                    format!("{} {} {}", format_index(i + 1), card.title, card.rating),
                    format!("{}Id: {}", indent(1), card.id),
                ]
            })
            .collect(),
    }
}

pub fn format_overlay(overlay: Option<&OverlayView>, labels: &LabelsConfig) -> Vec<String> {
    let Some(overlay) = overlay else {
        return Vec::new();
    };
    vec![
        format!("[{}] {}", overlay.id, overlay.title),
        format!("{}{}: {}", indent(1), labels.category, overlay.category),
        format!("{}{}", indent(1), overlay.rating),
        format!("{}{}", indent(1), overlay.link_text),
    ]
}

/// Lines for the regions a dispatch marked as changed.
pub fn format_refresh(page: &PageView, refresh: Refresh, labels: &LabelsConfig) -> Vec<String> {
    let mut lines = Vec::new();
    if refresh.sort_indicator {
        lines.extend(format_toolbar(&page.toolbar, labels));
    }
    if refresh.stats {
        lines.extend(format_stats(&page.stats, labels));
    }
    if refresh.grid {
        lines.extend(format_grid(&page.grid));
    }
    if refresh.overlay {
        match &page.overlay {
            Some(overlay) => lines.extend(format_overlay(Some(overlay), labels)),
            None => lines.push(format!("[{}]", labels.close)),
        }
    }
    lines
}

/// Every region of the page.
pub fn format_page(page: &PageView, labels: &LabelsConfig) -> Vec<String> {
    let mut lines = format_toolbar(&page.toolbar, labels);
    lines.extend(format_stats(&page.stats, labels));
    lines.extend(format_grid(&page.grid));
    lines.extend(format_overlay(page.overlay.as_ref(), labels));
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
