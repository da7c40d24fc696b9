//! Metrics - Per-Strategy Measurement Snapshots

use serde::{Deserialize, Serialize};

use crate::constants::{HEALTH_GOOD_BELOW, HEALTH_WARN_BELOW};

/// Snapshot of one strategy's cost, overwritten on every recomputation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyMetrics {
    /// Estimated number of rendered elements
    pub approx_dom_node_count: usize,
    /// Items disclosed (or materialized, for pure virtualization)
    pub items_loaded: usize,
    /// Time spent materializing the current window
    pub render_time_ms: f64,
    /// Inclusive `[first, last]` index range on screen
    pub visible_range: (usize, usize),
}

impl StrategyMetrics {
    /// Whether this strategy has produced any measurement yet
    pub fn is_measured(&self) -> bool {
        self.approx_dom_node_count > 0 || self.items_loaded > 0
    }

    /// Health classification, `None` until measured
    pub fn health(&self) -> Option<HealthStatus> {
        self.is_measured()
            .then(|| HealthStatus::from_node_count(self.approx_dom_node_count))
    }
}

/// Coarse classification of rendered node count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Warn,
    Bad,
}

impl HealthStatus {
    pub fn from_node_count(count: usize) -> Self {
        if count < HEALTH_GOOD_BELOW {
            HealthStatus::Good
        } else if count < HEALTH_WARN_BELOW {
            HealthStatus::Warn
        } else {
            HealthStatus::Bad
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Good => "Healthy",
            HealthStatus::Warn => "Moderate",
            HealthStatus::Bad => "Heavy",
        }
    }
}
