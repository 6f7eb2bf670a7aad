//! Interaction controller: user actions → state transitions → refresh.
//!
//! [`Gallery`] owns every piece of mutable widget state: the form inputs as
//! the user has typed them, the criteria last applied, the sort direction,
//! the current working set and the overlay. [`Gallery::dispatch`] is the single
//! entry point; it applies one [`Action`] and reports which display regions
//! changed as a [`Refresh`], so an adapter redraws exactly those.
//!
//! ## Transitions
//!
//! | Action | State change | Refresh |
//! |--------|--------------|---------|
//! | `SelectCategory` | input category set, inputs applied | grid, stats |
//! | `EditSearch` | input search set; applied only if empty or long enough | grid, stats (or nothing) |
//! | `Apply` | inputs applied | grid, stats |
//! | `ToggleSort` | direction flipped, working set re-derived | grid, sort indicator |
//! | `OpenCard` | overlay → `Shown(id)` | overlay |
//! | `CloseOverlay` | overlay → `Hidden` | overlay |
//! | `ClickOverlay { outside: true }` | overlay → `Hidden` | overlay |
//!
//! Short search input is kept in the form and picked up by the next apply or
//! category change; it just doesn't refresh on its own.

use crate::catalog::Catalog;
use crate::config::{GalleryConfig, LabelsConfig};
use crate::engine;
use crate::stats::{Stats, compute_stats};
use crate::types::{FilterCriteria, ImageRecord, SortState, WorkingSet};
use crate::view::{self, PageView};
use thiserror::Error;

/// Default minimum search length that refreshes while typing.
pub const DEFAULT_MIN_SEARCH_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Category selector changed. Empty string selects all categories.
    SelectCategory(String),
    /// Search field content changed.
    EditSearch(String),
    /// Explicit apply control.
    Apply,
    ToggleSort,
    /// A grid card was selected.
    OpenCard(u32),
    /// The overlay's close control.
    CloseOverlay,
    /// A click while the overlay is up; `outside` when it landed on the
    /// backdrop rather than the overlay content.
    ClickOverlay { outside: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Shown(u32),
}

/// Display regions that need redrawing after a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub grid: bool,
    pub stats: bool,
    pub sort_indicator: bool,
    pub overlay: bool,
}

impl Refresh {
    pub const NONE: Refresh = Refresh {
        grid: false,
        stats: false,
        sort_indicator: false,
        overlay: false,
    };
    pub const FILTERED: Refresh = Refresh {
        grid: true,
        stats: true,
        sort_indicator: false,
        overlay: false,
    };
    pub const SORTED: Refresh = Refresh {
        grid: true,
        stats: false,
        sort_indicator: true,
        overlay: false,
    };
    pub const OVERLAY: Refresh = Refresh {
        grid: false,
        stats: false,
        sort_indicator: false,
        overlay: true,
    };

    pub fn is_none(&self) -> bool {
        *self == Refresh::NONE
    }
}

#[derive(Debug, Clone)]
pub struct Gallery {
    catalog: Catalog,
    /// Form values as entered, not necessarily applied yet.
    input: FilterCriteria,
    /// Criteria the working set was last derived from.
    applied: FilterCriteria,
    sort: SortState,
    /// Catalog positions of the working set, in display order.
    working: Vec<usize>,
    stats: Stats,
    overlay: Overlay,
    min_search_chars: usize,
}

impl Gallery {
    /// Activate the gallery over a fully loaded catalog with no constraints.
    pub fn new(catalog: Catalog, sort: SortState) -> Self {
        let mut gallery = Self {
            catalog,
            input: FilterCriteria::default(),
            applied: FilterCriteria::default(),
            sort,
            working: Vec::new(),
            stats: Stats::default(),
            overlay: Overlay::Hidden,
            min_search_chars: DEFAULT_MIN_SEARCH_CHARS,
        };
        gallery.refilter();
        gallery
    }

    pub fn from_config(catalog: Catalog, config: &GalleryConfig) -> Self {
        let sort = SortState {
            ascending: config.sort.ascending,
        };
        Self::new(catalog, sort).with_min_search_chars(config.search.min_chars)
    }

    pub fn with_min_search_chars(mut self, min_chars: usize) -> Self {
        self.min_search_chars = min_chars.max(1);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn input(&self) -> &FilterCriteria {
        &self.input
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.applied
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn working_set(&self) -> WorkingSet<'_> {
        let records = self.catalog.records();
        WorkingSet::new(self.working.iter().map(|&i| &records[i]).collect())
    }

    /// The record shown in the overlay, if any.
    pub fn shown_record(&self) -> Option<&ImageRecord> {
        match self.overlay {
            Overlay::Hidden => None,
            Overlay::Shown(id) => self.catalog.get(id),
        }
    }

    /// Apply one action and report which regions changed.
    pub fn dispatch(&mut self, action: Action) -> Refresh {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::SelectCategory(category) => self.select_category(category),
            Action::EditSearch(text) => self.edit_search(text),
            Action::Apply => self.apply(),
            Action::ToggleSort => self.toggle_sort(),
            Action::OpenCard(id) => self.open(id),
            Action::CloseOverlay => self.close(),
            Action::ClickOverlay { outside: true } => self.close(),
            Action::ClickOverlay { outside: false } => Refresh::NONE,
        }
    }

    /// Full view-model of the current state.
    pub fn page_view(&self, labels: &LabelsConfig) -> PageView {
        let set = self.working_set();
        PageView {
            toolbar: view::render_toolbar(&self.catalog, &self.input, self.sort, labels),
            stats: view::render_stats(&self.stats),
            grid: view::render(&set, &labels.no_results),
            details: set.iter().map(view::render_overlay).collect(),
            overlay: self.shown_record().map(view::render_overlay),
        }
    }

    fn select_category(&mut self, category: String) -> Refresh {
        self.input.category = category;
        self.apply()
    }

    fn edit_search(&mut self, text: String) -> Refresh {
        let len = text.chars().count();
        self.input.search = text;
        if len == 0 || len >= self.min_search_chars {
            self.apply()
        } else {
            Refresh::NONE
        }
    }

    fn apply(&mut self) -> Refresh {
        self.applied = self.input.clone();
        self.refilter();
        Refresh::FILTERED
    }

    fn toggle_sort(&mut self) -> Refresh {
        self.sort = self.sort.toggled();
        self.working = engine::derive_positions(&self.catalog, &self.applied, self.sort);
        Refresh::SORTED
    }

    fn open(&mut self, id: u32) -> Refresh {
        if self.catalog.get(id).is_none() {
            tracing::warn!(id, "ignoring selection of unknown image");
            return Refresh::NONE;
        }
        self.overlay = Overlay::Shown(id);
        Refresh::OVERLAY
    }

    fn close(&mut self) -> Refresh {
        if self.overlay == Overlay::Hidden {
            return Refresh::NONE;
        }
        self.overlay = Overlay::Hidden;
        Refresh::OVERLAY
    }

    fn refilter(&mut self) {
        self.working = engine::derive_positions(&self.catalog, &self.applied, self.sort);
        self.stats = compute_stats(&self.working_set());
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid image id: {0}")]
    InvalidId(String),
}

/// Parse one line of the text action protocol.
///
/// ```text
/// category Города     category            (no argument = all categories)
/// search мост         search              (no argument = clear)
/// apply | sort | close | outside | inside
/// open 7
/// ```
pub fn parse_action(line: &str) -> Result<Action, ActionParseError> {
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line.trim_end(), ""),
    };
    match command {
        "" => Err(ActionParseError::Empty),
        "category" => Ok(Action::SelectCategory(rest.trim().to_string())),
        "search" => Ok(Action::EditSearch(rest.to_string())),
        "apply" => Ok(Action::Apply),
        "sort" => Ok(Action::ToggleSort),
        "open" => {
            let id = rest.trim();
            if id.is_empty() {
                return Err(ActionParseError::MissingArgument("open"));
            }
            id.parse()
                .map(Action::OpenCard)
                .map_err(|_| ActionParseError::InvalidId(id.to_string()))
        }
        "close" => Ok(Action::CloseOverlay),
        "outside" => Ok(Action::ClickOverlay { outside: true }),
        "inside" => Ok(Action::ClickOverlay { outside: false }),
        other => Err(ActionParseError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::mixed_catalog;

    fn gallery() -> Gallery {
        Gallery::new(mixed_catalog(), SortState::default())
    }

    #[test]
    fn starts_with_whole_catalog_descending() {
        let g = gallery();
        assert_eq!(g.working_set().len(), 6);
        assert_eq!(g.working_set().ids()[0], 3);
        assert_eq!(g.stats().count, 6);
        assert_eq!(g.overlay(), Overlay::Hidden);
    }

    #[test]
    fn category_change_refreshes_grid_and_stats() {
        let mut g = gallery();
        let refresh = g.dispatch(Action::SelectCategory("Cities".into()));
        assert_eq!(refresh, Refresh::FILTERED);
        assert_eq!(g.working_set().ids(), vec![4, 2]);
        assert_eq!(g.stats().count, 2);
    }

    #[test]
    fn short_search_is_kept_but_not_applied() {
        let mut g = gallery();
        assert!(g.dispatch(Action::EditSearch("b".into())).is_none());
        assert!(g.dispatch(Action::EditSearch("br".into())).is_none());
        assert_eq!(g.input().search, "br");
        assert_eq!(g.criteria().search, "");
        assert_eq!(g.working_set().len(), 6);
    }

    #[test]
    fn long_search_applies_immediately() {
        let mut g = gallery();
        let refresh = g.dispatch(Action::EditSearch("bri".into()));
        assert_eq!(refresh, Refresh::FILTERED);
        assert_eq!(g.working_set().ids(), vec![2]);
    }

    #[test]
    fn clearing_search_applies_immediately() {
        let mut g = gallery();
        g.dispatch(Action::EditSearch("bridge".into()));
        assert_eq!(g.working_set().len(), 1);
        let refresh = g.dispatch(Action::EditSearch(String::new()));
        assert_eq!(refresh, Refresh::FILTERED);
        assert_eq!(g.working_set().len(), 6);
    }

    #[test]
    fn search_length_counts_characters_not_bytes() {
        let mut g = gallery();
        // Two Cyrillic characters are four bytes.
        assert!(g.dispatch(Action::EditSearch("мо".into())).is_none());
        assert!(!g.dispatch(Action::EditSearch("мос".into())).is_none());
    }

    #[test]
    fn apply_picks_up_short_search() {
        let mut g = gallery();
        g.dispatch(Action::EditSearch("sk".into()));
        let refresh = g.dispatch(Action::Apply);
        assert_eq!(refresh, Refresh::FILTERED);
        assert_eq!(g.working_set().ids(), vec![4]);
    }

    #[test]
    fn category_change_also_applies_pending_search() {
        let mut g = gallery();
        g.dispatch(Action::EditSearch("mo".into()));
        g.dispatch(Action::SelectCategory("Cities".into()));
        assert_eq!(g.working_set().ids(), vec![2]);
    }

    #[test]
    fn custom_min_search_chars() {
        let mut g = gallery().with_min_search_chars(1);
        assert_eq!(g.dispatch(Action::EditSearch("k".into())), Refresh::FILTERED);
    }

    #[test]
    fn toggle_sort_flips_and_leaves_stats() {
        let mut g = gallery();
        let before = g.stats();
        let refresh = g.dispatch(Action::ToggleSort);
        assert_eq!(refresh, Refresh::SORTED);
        assert!(g.sort().ascending);
        assert_eq!(g.working_set().ids()[0], 5);
        assert_eq!(g.stats(), before);
    }

    #[test]
    fn toggle_sort_twice_restores_order() {
        let mut g = gallery();
        let original = g.working_set().ids();
        g.dispatch(Action::ToggleSort);
        assert_ne!(g.working_set().ids(), original);
        g.dispatch(Action::ToggleSort);
        assert_eq!(g.working_set().ids(), original);
    }

    #[test]
    fn toggle_sort_keeps_applied_filter() {
        let mut g = gallery();
        g.dispatch(Action::SelectCategory("Nature".into()));
        g.dispatch(Action::ToggleSort);
        assert_eq!(g.working_set().ids(), vec![6, 1, 3]);
    }

    #[test]
    fn overlay_open_and_close() {
        let mut g = gallery();
        assert_eq!(g.dispatch(Action::OpenCard(2)), Refresh::OVERLAY);
        assert_eq!(g.overlay(), Overlay::Shown(2));
        assert_eq!(g.shown_record().unwrap().title, "Modern bridge");
        assert_eq!(g.dispatch(Action::CloseOverlay), Refresh::OVERLAY);
        assert_eq!(g.overlay(), Overlay::Hidden);
    }

    #[test]
    fn outside_click_hides_inside_click_does_not() {
        let mut g = gallery();
        g.dispatch(Action::OpenCard(1));
        assert!(g.dispatch(Action::ClickOverlay { outside: false }).is_none());
        assert_eq!(g.overlay(), Overlay::Shown(1));
        assert_eq!(
            g.dispatch(Action::ClickOverlay { outside: true }),
            Refresh::OVERLAY
        );
        assert_eq!(g.overlay(), Overlay::Hidden);
    }

    #[test]
    fn reopening_overwrites_shown_record() {
        let mut g = gallery();
        g.dispatch(Action::OpenCard(1));
        g.dispatch(Action::OpenCard(4));
        assert_eq!(g.overlay(), Overlay::Shown(4));
    }

    #[test]
    fn closing_hidden_overlay_is_noop() {
        let mut g = gallery();
        assert!(g.dispatch(Action::CloseOverlay).is_none());
        assert!(g.dispatch(Action::ClickOverlay { outside: true }).is_none());
    }

    #[test]
    fn unknown_card_is_ignored() {
        let mut g = gallery();
        assert!(g.dispatch(Action::OpenCard(999)).is_none());
        assert_eq!(g.overlay(), Overlay::Hidden);
    }

    #[test]
    fn page_view_reflects_state() {
        let mut g = gallery();
        let labels = LabelsConfig::default();
        g.dispatch(Action::EditSearch("zzz".into()));
        g.dispatch(Action::OpenCard(3));
        let page = g.page_view(&labels);
        assert!(page.grid.is_empty());
        assert_eq!(page.stats.count, "0");
        assert_eq!(page.stats.average, "0");
        assert_eq!(page.toolbar.search, "zzz");
        assert_eq!(page.toolbar.sort_glyph, "↓");
        assert!(page.details.is_empty());
        assert_eq!(page.overlay.unwrap().id, 3);
    }

    #[test]
    fn page_view_has_detail_per_card() {
        let mut g = gallery();
        g.dispatch(Action::SelectCategory("Cities".into()));
        let page = g.page_view(&LabelsConfig::default());
        let ids: Vec<u32> = page.details.iter().map(|d| d.id).collect();
        assert_eq!(ids, g.working_set().ids());
    }

    #[test]
    fn from_config_uses_sort_and_search_settings() {
        let mut config = GalleryConfig::default();
        config.sort.ascending = true;
        config.search.min_chars = 2;
        let mut g = Gallery::from_config(mixed_catalog(), &config);
        assert!(g.sort().ascending);
        assert_eq!(g.dispatch(Action::EditSearch("sk".into())), Refresh::FILTERED);
    }

    #[test]
    fn parse_actions() {
        assert_eq!(
            parse_action("category Города"),
            Ok(Action::SelectCategory("Города".into()))
        );
        assert_eq!(parse_action("category"), Ok(Action::SelectCategory(String::new())));
        assert_eq!(
            parse_action("search мост"),
            Ok(Action::EditSearch("мост".into()))
        );
        assert_eq!(parse_action("search"), Ok(Action::EditSearch(String::new())));
        assert_eq!(parse_action("apply\n"), Ok(Action::Apply));
        assert_eq!(parse_action("sort"), Ok(Action::ToggleSort));
        assert_eq!(parse_action("open 7"), Ok(Action::OpenCard(7)));
        assert_eq!(parse_action("close"), Ok(Action::CloseOverlay));
        assert_eq!(
            parse_action("outside"),
            Ok(Action::ClickOverlay { outside: true })
        );
        assert_eq!(
            parse_action("inside"),
            Ok(Action::ClickOverlay { outside: false })
        );
    }

    #[test]
    fn parse_action_errors() {
        assert_eq!(parse_action("   "), Err(ActionParseError::Empty));
        assert_eq!(
            parse_action("zoom"),
            Err(ActionParseError::Unknown("zoom".into()))
        );
        assert_eq!(
            parse_action("open"),
            Err(ActionParseError::MissingArgument("open"))
        );
        assert_eq!(
            parse_action("open seven"),
            Err(ActionParseError::InvalidId("seven".into()))
        );
    }
}
