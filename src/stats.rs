//! Count and average rating of a working set.

use crate::types::WorkingSet;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub count: usize,
    /// Arithmetic mean of ratings; `0.0` for an empty set.
    pub average_rating: f64,
}

impl Stats {
    /// Average as shown to the user: one decimal place, or a bare `0` when
    /// there is nothing to average.
    pub fn display_average(&self) -> String {
        if self.count == 0 {
            "0".to_string()
        } else {
            one_decimal(self.average_rating)
        }
    }
}

/// One decimal place, halves rounded away from zero (`4.25` → `4.3`).
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

pub fn compute_stats(set: &WorkingSet<'_>) -> Stats {
    let count = set.len();
    if count == 0 {
        return Stats::default();
    }
    let total: f64 = set.iter().map(|r| r.rating).sum();
    Stats {
        count,
        average_rating: total / count as f64,
    }
}
