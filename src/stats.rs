//! Dashboard statistics.
//!
//! Pure aggregation over a record slice: counts per status (every status,
//! zero-filled) and counts per category ordered for the bar chart.

use crate::domain::{Record, Status};
use serde::Serialize;
use std::collections::HashMap;

/// Record count for one status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSlice {
    pub status: Status,
    pub count: usize,
    /// Share of all records, 0.0 when there are none
    pub share: f64,
    pub color: &'static str,
}

/// Record count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    /// One slice per status, in `Status::ALL` order
    pub by_status: Vec<StatusSlice>,
    /// Descending by count, ties by name
    pub by_category: Vec<CategoryCount>,
}

impl Statistics {
    /// Count for a single status.
    pub fn status_count(&self, status: Status) -> usize {
        self.by_status
            .iter()
            .find(|slice| slice.status == status)
            .map(|slice| slice.count)
            .unwrap_or(0)
    }

    /// Count for a single category.
    pub fn category_count(&self, category: &str) -> usize {
        self.by_category
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Aggregate the given records.
pub fn aggregate(records: &[Record]) -> Statistics {
    let total = records.len();

    let mut status_counts: HashMap<Status, usize> = HashMap::new();
    let mut category_counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *status_counts.entry(record.status).or_default() += 1;
        *category_counts.entry(record.category.as_str()).or_default() += 1;
    }

    let by_status = Status::ALL
        .into_iter()
        .map(|status| {
            let count = status_counts.get(&status).copied().unwrap_or(0);
            StatusSlice {
                status,
                count,
                share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
                color: status.color_hex(),
            }
        })
        .collect();

    let mut by_category: Vec<CategoryCount> = category_counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    by_category.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

    Statistics {
        total,
        by_status,
        by_category,
    }
}
