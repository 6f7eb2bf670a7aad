//! Shared fixtures for unit tests.

use crate::catalog::Catalog;
use crate::types::{ImageRecord, WorkingSet};

/// Build a record with a url derived from its id.
pub fn image(id: u32, title: &str, category: &str, rating: f64) -> ImageRecord {
    ImageRecord {
        id,
        title: title.to_string(),
        category: category.to_string(),
        rating,
        url: format!("https://img.example/{id}.jpg"),
    }
}

/// A small catalog with two categories, a blank category and no rating ties.
pub fn mixed_catalog() -> Catalog {
    Catalog::new(vec![
        image(1, "Sunset over sea", "Nature", 4.5),
        image(2, "Modern bridge", "Cities", 4.2),
        image(3, "Mountain view", "Nature", 4.8),
        image(4, "Skyline", "Cities", 4.6),
        image(5, "Untitled scan", "", 2.5),
        image(6, "Forest trail", "Nature", 4.1),
    ])
    .unwrap()
}

/// Ratings of a working set, in display order.
pub fn ratings(set: &WorkingSet<'_>) -> Vec<f64> {
    set.iter().map(|r| r.rating).collect()
}
