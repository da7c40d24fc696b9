//! Virtualization - Window over the Full Dataset
//!
//! No loader: every index is addressable immediately and only the rows
//! around the viewport are materialized. Offline collapses the list to zero
//! rows.

use std::ops::Range;
use tracing::debug;

use super::{ListStatus, Strategy};
use crate::domain::{Controls, StrategyKind, ViewportConfig};
use crate::windowing::{ItemExtent, Windower};

#[derive(Debug)]
pub struct VirtualList {
    controls: Controls,
    windower: Windower,
}

impl VirtualList {
    pub fn new(viewport: ViewportConfig, controls: Controls) -> Self {
        let mut list = Self {
            controls,
            windower: Windower::new(
                ItemExtent::Uniform(viewport.item_extent),
                viewport.extent,
                viewport.overscan,
            ),
        };
        list.reset();
        list
    }

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    /// Rows intersecting the viewport, without overscan
    pub fn on_screen(&self) -> (usize, usize) {
        self.windower.visible_range()
    }

    /// Scroll the minimum distance that brings `index` fully into view
    pub fn scroll_to_index(&mut self, index: usize) -> f64 {
        self.windower.scroll_to_index(index)
    }

    fn reset(&mut self) {
        let count = if self.controls.network.is_offline() {
            0
        } else {
            self.controls.dataset_size
        };
        self.windower.set_count(count);
        self.windower.set_scroll_offset(0.0);
        debug!(count, "Virtual list reset");
    }
}

impl Strategy for VirtualList {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Virtual
    }

    fn controls(&self) -> Controls {
        self.controls
    }

    fn configure(&mut self, controls: Controls) {
        self.controls = controls;
        self.reset();
    }

    fn pump(&mut self) -> bool {
        false
    }

    fn viewport_scrolled(&mut self, offset: f64) {
        self.windower.set_scroll_offset(offset);
    }

    fn materialized(&self) -> Range<usize> {
        match self.windower.items() {
            [] => 0..0,
            [first, .., last] => first.index..last.index + 1,
            [only] => only.index..only.index + 1,
        }
    }

    /// Rows materialized right now
    fn items_loaded(&self) -> usize {
        self.windower.items().len()
    }

    fn visible_range(&self) -> (usize, usize) {
        self.windower.materialized_range()
    }

    fn status(&self) -> ListStatus {
        if self.controls.network.is_offline() {
            ListStatus::Offline
        } else if self.controls.dataset_size == 0 {
            ListStatus::Empty
        } else {
            ListStatus::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkProfile, Theme};

    fn list(size: usize, network: NetworkProfile) -> VirtualList {
        VirtualList::new(
            ViewportConfig::default(),
            Controls {
                dataset_size: size,
                theme: Theme::Logs,
                network,
            },
        )
    }

    #[test]
    fn test_materialized_rows_do_not_depend_on_dataset_size() {
        let small = list(1_000, NetworkProfile::Fast);
        let large = list(100_000, NetworkProfile::Fast);

        assert_eq!(small.items_loaded(), 10);
        assert_eq!(large.items_loaded(), 10);
        assert_eq!(small.metrics().approx_dom_node_count, large.metrics().approx_dom_node_count);
        assert_eq!(large.windower().total_extent(), 8_000_000.0);
    }

    #[test]
    fn test_scroll_moves_window() {
        let mut list = list(100_000, NetworkProfile::Fast);
        list.viewport_scrolled(8_000.0);

        assert_eq!(list.on_screen(), (100, 104));
        assert_eq!(list.visible_range(), (95, 109));
        assert_eq!(list.materialized(), 95..110);
        assert_eq!(list.rows().first().map(|item| item.id), Some(95));
    }

    #[test]
    fn test_offline_has_no_rows() {
        let list = list(1_000, NetworkProfile::Offline);
        assert_eq!(list.windower().count(), 0);
        assert_eq!(list.items_loaded(), 0);
        assert_eq!(list.visible_range(), (0, 0));
        assert_eq!(list.status(), ListStatus::Offline);
    }

    #[test]
    fn test_reconfigure_resets_scroll() {
        let mut list = list(1_000, NetworkProfile::Fast);
        list.viewport_scrolled(4_000.0);
        list.configure(Controls {
            dataset_size: 1_000,
            theme: Theme::Tasks,
            network: NetworkProfile::Slow,
        });
        assert_eq!(list.windower().scroll_offset(), 0.0);
        assert_eq!(list.visible_range(), (0, 9));
    }
}
