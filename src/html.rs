//! HTML adapter.
//!
//! Translates the view-models from [`crate::view`] into markup and writes the
//! standalone gallery page. Nothing here decides *what* is shown; every string
//! and flag comes from the view-model, so the same [`PageView`] always renders
//! to the same document and a redraw fully replaces the previous one.
//!
//! ## Page Structure
//!
//! ```text
//! header.toolbar     category select, search field, apply, sort toggle + glyph
//! section.stats      count, average rating
//! main#gallery       a.image-card × N   |   div.no-results
//! div.modal × N      one per card, id `image-N`: title, image, category,
//!                    rating, url link, close control
//! ```
//!
//! Cards link to `#image-N`; `.modal:target` shows that overlay. The close
//! control and backdrop link back to `#gallery`, which hides every overlay,
//! including one rendered open because a record was selected.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time; color custom properties are
//! generated from config and prepended.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating with
//! automatic escaping of all interpolated values.

use crate::config::{self, GalleryConfig, LabelsConfig};
use crate::view::{CardView, GridView, OverlayView, PageView, StatsView, ToolbarView};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Full stylesheet: generated color variables followed by the static rules.
pub fn stylesheet(config: &GalleryConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// Render the page and write it to `path`, creating parent directories.
pub fn write_page(path: &Path, page: &PageView, config: &GalleryConfig) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let markup = render_page(page, config);
    fs::write(path, markup.into_string())?;
    tracing::info!(path = %path.display(), "wrote gallery page");
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

pub fn render_toolbar(toolbar: &ToolbarView, labels: &LabelsConfig) -> Markup {
    html! {
        header.toolbar {
            form.filters method="get" {
                select #category name="category" {
                    @for option in &toolbar.categories {
                        option value=(option.value) selected[option.selected] { (option.label) }
                    }
                }
                input #search type="search" name="search" value=(toolbar.search)
                    placeholder=(labels.search_placeholder);
                button #apply-filters type="submit" { (labels.apply) }
            }
            button #sort-rating type="button" {
                (labels.sort) " "
                span #sort-direction { (toolbar.sort_glyph) }
            }
        }
    }
}

pub fn render_stats(stats: &StatsView, labels: &LabelsConfig) -> Markup {
    html! {
        section.stats {
            span.stat { (labels.count) ": " span #total-count { (stats.count) } }
            span.stat { (labels.average) ": " span #avg-rating { (stats.average) } }
        }
    }
}

/// Fragment id of a record's detail overlay.
pub fn overlay_anchor(id: u32) -> String {
    format!("image-{id}")
}

fn render_card(card: &CardView) -> Markup {
    html! {
        a.image-card href={ "#" (overlay_anchor(card.id)) } data-id=(card.id) {
            img src=(card.image_url) alt=(card.image_alt) loading="lazy";
            div.image-info {
                div.image-title { (card.title) }
                div.image-rating { (card.rating) }
            }
        }
    }
}

pub fn render_grid(grid: &GridView) -> Markup {
    html! {
        main #gallery {
            @match grid {
                GridView::Cards(cards) => {
                    div.grid {
                        @for card in cards {
                            (render_card(card))
                        }
                    }
                }
                GridView::Empty { message } => {
                    div.no-results { (message) }
                }
            }
        }
    }
}

/// A single detail overlay, addressable as `#image-N`.
pub fn render_overlay(overlay: &OverlayView, is_open: bool, labels: &LabelsConfig) -> Markup {
    html! {
        div.modal.open[is_open] id=(overlay_anchor(overlay.id)) data-id=(overlay.id) {
            a.modal-backdrop href="#gallery" {}
            div.modal-content {
                a.close href="#gallery" { (labels.close) }
                h2.modal-title { (overlay.title) }
                img.modal-image src=(overlay.image_url) alt=(overlay.image_alt) loading="lazy";
                p {
                    (labels.category) ": "
                    span.modal-category { (overlay.category) }
                }
                p.modal-rating { (overlay.rating) }
                a.modal-url href=(overlay.link_href) target="_blank" rel="noopener" {
                    (overlay.link_text)
                }
            }
        }
    }
}

/// One overlay per card, with the shown record rendered open. A shown record
/// outside the working set still gets its overlay.
pub fn render_overlays(
    details: &[OverlayView],
    shown: Option<&OverlayView>,
    labels: &LabelsConfig,
) -> Markup {
    let shown_id = shown.map(|o| o.id);
    let orphan = shown.filter(|o| !details.iter().any(|d| d.id == o.id));
    html! {
        @for overlay in details {
            (render_overlay(overlay, shown_id == Some(overlay.id), labels))
        }
        @if let Some(overlay) = orphan {
            (render_overlay(overlay, true, labels))
        }
    }
}

/// Renders the complete gallery page.
pub fn render_page(page: &PageView, config: &GalleryConfig) -> Markup {
    let labels = &config.labels;
    let content = html! {
        (render_toolbar(&page.toolbar, labels))
        (render_stats(&page.stats, labels))
        (render_grid(&page.grid))
        (render_overlays(&page.details, page.overlay.as_ref(), labels))
    };
    base_document(&config.title, &stylesheet(config), content)
}

// ============================================================================
// Tests
// ============================================================================
