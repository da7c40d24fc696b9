//! MetricsBoard - Per-Strategy Metrics Aggregator
//!
//! Holds the latest snapshot per strategy. Snapshots are overwritten
//! wholesale; there is no history.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::domain::{StrategyKind, StrategyMetrics};
use crate::error::Result;
use crate::helpers::{format_ms, format_number};

#[derive(Debug, Clone, Default)]
pub struct MetricsBoard {
    snapshots: BTreeMap<StrategyKind, StrategyMetrics>,
}

impl MetricsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the snapshot for `kind`
    pub fn record(&mut self, kind: StrategyKind, metrics: StrategyMetrics) {
        self.snapshots.insert(kind, metrics);
    }

    pub fn get(&self, kind: StrategyKind) -> Option<StrategyMetrics> {
        self.snapshots.get(&kind).copied()
    }

    /// Measured snapshots in strategy order
    pub fn measured(&self) -> impl Iterator<Item = (StrategyKind, StrategyMetrics)> + '_ {
        self.snapshots
            .iter()
            .filter(|(_, metrics)| metrics.is_measured())
            .map(|(kind, metrics)| (*kind, *metrics))
    }

    /// Measured strategy with the fewest rendered nodes
    pub fn lightest(&self) -> Option<StrategyKind> {
        self.measured()
            .min_by_key(|(_, metrics)| metrics.approx_dom_node_count)
            .map(|(kind, _)| kind)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots as a JSON object keyed by strategy
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshots)?)
    }

    /// Plain-text comparison table, one row per strategy
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<18} {:>8} {:>15} {:>8} {:<9} {:>10}",
            "strategy", "items", "range", "nodes", "health", "render"
        );
        for kind in StrategyKind::ALL {
            let Some(metrics) = self.get(kind) else {
                let _ = writeln!(out, "{:<18} {:>8}", kind.label(), "-");
                continue;
            };
            let (first, last) = metrics.visible_range;
            let health = metrics.health().map_or("-", |health| health.label());
            let _ = writeln!(
                out,
                "{:<18} {:>8} {:>15} {:>8} {:<9} {:>10}",
                kind.label(),
                format_number(metrics.items_loaded),
                format!("{first}-{last}"),
                format_number(metrics.approx_dom_node_count),
                health,
                format_ms(metrics.render_time_ms),
            );
        }
        out
    }
}
