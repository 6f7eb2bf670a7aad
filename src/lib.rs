//! # Vitrine
//!
//! A gallery view engine: filter an image catalog by category and title,
//! sort it by rating, summarise it, and draw it as a card grid with a detail
//! overlay.
//!
//! # Architecture: One Data Flow
//!
//! ```text
//!              Action
//!                │
//!          controller::Gallery::dispatch
//!                │  criteria / sort / overlay
//!                ▼
//! catalog ──► engine::derive ──► WorkingSet ──┬──► stats::compute_stats
//!                                             └──► view::render ──► html / output
//! ```
//!
//! Every step up to the view-models is pure. The controller is the only
//! owner of mutable state and reports which display regions changed; the two
//! adapters ([`html`], [`output`]) turn view-models into markup or terminal
//! lines and nothing else.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageRecord`, `FilterCriteria`, `SortState`, `WorkingSet` |
//! | [`catalog`] | Immutable record list: loading, validation, category extraction |
//! | [`engine`] | Filter predicate and stable rating sort |
//! | [`stats`] | Count and average rating |
//! | [`view`] | View-models for toolbar, stats, grid and overlay |
//! | [`controller`] | Widget state, actions, dispatch, text action protocol |
//! | [`html`] | Maud adapter writing the standalone gallery page |
//! | [`output`] | Terminal adapter |
//! | [`config`] | `vitrine.toml` loading, merging and validation |
//!
//! # Design Decisions
//!
//! ## Positions, Not Copies
//!
//! The controller stores the working set as catalog positions and hands out
//! a borrowed [`types::WorkingSet`] on demand. Records are never cloned into
//! the working set, and a refresh replaces the position list wholesale.
//!
//! ## Search-As-You-Type Threshold
//!
//! Typing refreshes the grid only when the search box is empty or holds at
//! least `search.min_chars` characters (3 by default). Shorter input is kept
//! in the form and used by the next apply or category change.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod engine;
pub mod html;
pub mod output;
pub mod stats;
pub mod types;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
