//! The immutable source list of image records.
//!
//! A [`Catalog`] is fully populated before any interaction happens: either the
//! built-in demo set ([`Catalog::builtin`]) or a JSON array loaded from disk
//! ([`Catalog::load`]). Records are validated once on construction; after
//! that the catalog never changes and everything else borrows from it.
//!
//! ## JSON Format
//!
//! ```json
//! [
//!   {"id": 1, "title": "Закат на море", "category": "Природа", "rating": 4.5, "url": "https://..."},
//!   {"id": 2, "title": "Без категории", "rating": 3.0, "url": "https://..."}
//! ]
//! ```
//!
//! A missing `category` is read as blank.

use crate::types::ImageRecord;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Highest allowed rating.
pub const MAX_RATING: f64 = 5.0;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: Vec<ImageRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range ratings.
    pub fn new(records: Vec<ImageRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate image id {}",
                    record.id
                )));
            }
            if !record.rating.is_finite() || !(0.0..=MAX_RATING).contains(&record.rating) {
                return Err(CatalogError::Validation(format!(
                    "image {} has rating {} outside 0-{}",
                    record.id, record.rating, MAX_RATING
                )));
            }
        }
        Ok(Self { records })
    }

    /// Load a catalog from a JSON array of records.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let records: Vec<ImageRecord> = serde_json::from_str(&content)?;
        let catalog = Self::new(records)?;
        tracing::info!(
            path = %path.display(),
            records = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// The demo catalog shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            records: builtin_records(),
        }
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ImageRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Sorted distinct categories, skipping blank ones.
    pub fn categories(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| !c.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn record(id: u32, title: &str, category: &str, rating: f64, url: &str) -> ImageRecord {
    ImageRecord {
        id,
        title: title.to_string(),
        category: category.to_string(),
        rating,
        url: url.to_string(),
    }
}

fn builtin_records() -> Vec<ImageRecord> {
    const UNSPLASH: &str = "https://images.unsplash.com";
    const CROP: &str = "ixlib=rb-1.2.1&auto=format&fit=crop&w=500&q=80";
    vec![
        record(
            1,
            "Закат на море",
            "Природа",
            4.5,
            &format!("{UNSPLASH}/photo-1506744038136-46273834b3fb?{CROP}"),
        ),
        record(
            2,
            "Современный мост",
            "Города",
            4.2,
            &format!("{UNSPLASH}/photo-1496564203457-11bb12075d90?{CROP}"),
        ),
        record(
            3,
            "Горный пейзаж",
            "Природа",
            4.8,
            &format!("{UNSPLASH}/photo-1454496522488-7a8e488e8606?{CROP}"),
        ),
        record(
            4,
            "Океанские волны",
            "Природа",
            4.3,
            &format!("{UNSPLASH}/photo-1505118380757-91f5f5632de0?{CROP}"),
        ),
        record(
            5,
            "Лесная тропа",
            "Природа",
            4.1,
            &format!("{UNSPLASH}/photo-1448375240586-882707db888b?{CROP}"),
        ),
        record(
            6,
            "Небоскребы",
            "Города",
            4.6,
            &format!("{UNSPLASH}/photo-1477959858617-67f85cf4f1df?{CROP}"),
        ),
        record(
            7,
            "Городской парк",
            "Города",
            4.9,
            "https://plus.unsplash.com/premium_photo-1697778135834-7104fdb80e7e?q=80&w=688&auto=format&fit=crop&ixlib=rb-4.1.0&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D",
        ),
        record(
            8,
            "Водопад",
            "Природа",
            3.9,
            &format!("{UNSPLASH}/photo-1433086966358-54859d0ed716?{CROP}"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::image;
    use tempfile::TempDir;

    #[test]
    fn builtin_has_eight_records_in_two_categories() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.categories(), vec!["Города", "Природа"]);
    }

    #[test]
    fn builtin_park_url_keeps_full_query() {
        let catalog = Catalog::builtin();
        let park = catalog.get(7).unwrap();
        assert!(park.url.starts_with("https://plus.unsplash.com/premium_photo-1697778135834"));
        assert!(park.url.ends_with("&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D"));
    }

    #[test]
    fn builtin_passes_validation() {
        let records = Catalog::builtin().records().to_vec();
        assert!(Catalog::new(records).is_ok());
    }

    #[test]
    fn categories_skip_blank_and_dedupe() {
        let catalog = Catalog::new(vec![
            image(1, "a", "Zoo", 1.0),
            image(2, "b", "", 2.0),
            image(3, "c", "   ", 3.0),
            image(4, "d", "Art", 4.0),
            image(5, "e", "Zoo", 5.0),
        ])
        .unwrap();
        assert_eq!(catalog.categories(), vec!["Art", "Zoo"]);
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = Catalog::new(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Catalog::new(vec![image(1, "a", "X", 1.0), image(1, "b", "Y", 2.0)]);
        assert!(matches!(result, Err(CatalogError::Validation(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn out_of_range_rating_rejected() {
        assert!(Catalog::new(vec![image(1, "a", "X", 5.1)]).is_err());
        assert!(Catalog::new(vec![image(1, "a", "X", -0.5)]).is_err());
        assert!(Catalog::new(vec![image(1, "a", "X", f64::NAN)]).is_err());
    }

    #[test]
    fn boundary_ratings_accepted() {
        assert!(Catalog::new(vec![image(1, "a", "X", 0.0), image(2, "b", "X", 5.0)]).is_ok());
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get(2).unwrap().title, "Современный мост");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn load_reads_json_and_defaults_missing_category() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "title": "One", "category": "A", "rating": 4.0, "url": "one.jpg"},
                {"id": 2, "title": "Two", "rating": 3.5, "url": "two.jpg"}
            ]"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(2).unwrap().category, "");
        assert_eq!(catalog.categories(), vec!["A"]);
    }

    #[test]
    fn load_rejects_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Catalog::load(&path), Err(CatalogError::Json(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = Catalog::load(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
