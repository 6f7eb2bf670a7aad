//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `vitrine.toml`. User files are
//! sparse: stock defaults are the base layer and the user file overrides only
//! the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! catalog = ""              # JSON catalog file; empty = built-in demo catalog
//! title = "Галерея"         # Page title
//!
//! [labels]
//! all_categories = "Все категории"
//! no_results = "Изображения не найдены. Попробуйте изменить параметры фильтрации."
//! search_placeholder = "Поиск по названию"
//! apply = "Применить"
//! sort = "Рейтинг"
//! count = "Всего"
//! average = "Средний рейтинг"
//! category = "Категория"
//! close = "×"
//!
//! [search]
//! min_chars = 3             # Typing refreshes when empty or at least this long
//!
//! [sort]
//! ascending = false         # Initial rating sort direction
//!
//! [colors.light]
//! background = "#f5f5f5"
//! surface = "#ffffff"
//! text = "#222222"
//! text_muted = "#666666"
//! accent = "#f5a623"
//!
//! [colors.dark]
//! background = "#121212"
//! surface = "#1e1e1e"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! accent = "#f5a623"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in a directory by [`load_config`].
pub const CONFIG_FILE: &str = "vitrine.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `vitrine.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Path to a JSON catalog. Empty means the built-in catalog.
    pub catalog: String,
    /// Document title for rendered pages.
    pub title: String,
    /// User-facing strings.
    pub labels: LabelsConfig,
    /// Search-as-you-type behaviour.
    pub search: SearchConfig,
    /// Initial sort direction.
    pub sort: SortConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            catalog: String::new(),
            title: "Галерея".to_string(),
            labels: LabelsConfig::default(),
            search: SearchConfig::default(),
            sort: SortConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.min_chars == 0 {
            return Err(ConfigError::Validation(
                "search.min_chars must be at least 1".into(),
            ));
        }
        for (mode, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if scheme.fields().iter().any(|(_, v)| v.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode} values must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// User-facing strings shown in the toolbar, stats, grid and overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Selector entry that clears the category constraint.
    pub all_categories: String,
    /// Placeholder shown instead of the grid when nothing matches.
    pub no_results: String,
    pub search_placeholder: String,
    pub apply: String,
    pub sort: String,
    pub count: String,
    pub average: String,
    /// Caption for the category line in the detail overlay.
    pub category: String,
    pub close: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            all_categories: "Все категории".to_string(),
            no_results: "Изображения не найдены. Попробуйте изменить параметры фильтрации."
                .to_string(),
            search_placeholder: "Поиск по названию".to_string(),
            apply: "Применить".to_string(),
            sort: "Рейтинг".to_string(),
            count: "Всего".to_string(),
            average: "Средний рейтинг".to_string(),
            category: "Категория".to_string(),
            close: "×".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Typing refreshes the gallery only when the search text is empty or has
    /// at least this many characters.
    pub min_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { min_chars: 3 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    pub ascending: bool,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and overlay background.
    pub surface: String,
    pub text: String,
    /// Secondary text (stats, captions).
    pub text_muted: String,
    /// Rating stars and active controls.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f5f5f5".to_string(),
            surface: "#ffffff".to_string(),
            text: "#222222".to_string(),
            text_muted: "#666666".to_string(),
            accent: "#f5a623".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            surface: "#1e1e1e".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            accent: "#f5a623".to_string(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("bg", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text", self.text.as_str()),
            ("text-muted", self.text_muted.as_str()),
            ("accent", self.accent.as_str()),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `vitrine.toml` from the given directory, falling back to defaults.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let overlay = load_raw_config(&path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "applying config overrides");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Load an explicit config file path. A missing file is an error.
pub fn load_config_file(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "applying config overrides");
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `vitrine.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# JSON catalog file: an array of {id, title, category, rating, url}.
# Leave empty to use the built-in demo catalog.
catalog = ""

# Document title for rendered pages.
title = "Галерея"

# ---------------------------------------------------------------------------
# Labels
# ---------------------------------------------------------------------------
[labels]
all_categories = "Все категории"
no_results = "Изображения не найдены. Попробуйте изменить параметры фильтрации."
search_placeholder = "Поиск по названию"
apply = "Применить"
sort = "Рейтинг"
count = "Всего"
average = "Средний рейтинг"
category = "Категория"
close = "×"

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Typing refreshes the gallery only when the search box is empty or holds at
# least this many characters. Shorter input is kept and used on "apply".
min_chars = 3

# ---------------------------------------------------------------------------
# Sorting
# ---------------------------------------------------------------------------
[sort]
# Initial rating order. false = best first.
ascending = false

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f5f5f5"
surface = "#ffffff"
text = "#222222"
text_muted = "#666666"
accent = "#f5a623"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
surface = "#1e1e1e"
text = "#eeeeee"
text_muted = "#999999"
accent = "#f5a623"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| -> String {
        scheme
            .fields()
            .iter()
            .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
