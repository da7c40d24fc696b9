//! Item - Synthetic List Entry

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single list entry, fully determined by its index and theme
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Position in the dataset
    pub id: usize,
    /// Primary line
    pub title: &'static str,
    /// Secondary line
    pub subtitle: &'static str,
    /// Category badge
    pub category: &'static str,
    /// 1-3 unique tags in selection order
    pub tags: Vec<&'static str>,
    /// Numeric value in `[0, 100)` with two decimals
    pub value: f64,
    /// Milliseconds since epoch
    pub timestamp_ms: i64,
    /// Theme avatar glyph
    pub avatar: &'static str,
}

impl Item {
    /// Timestamp as a UTC datetime
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }

    /// Value formatted with two decimals
    pub fn value_label(&self) -> String {
        format!("{:.2}", self.value)
    }
}
