//! Windowing Engine
//!
//! Decides which of `count` items must be materialized for a scroll position.
//! Every mutation recomputes the window synchronously, so the value returned by
//! [`Windower::items`] is never stale with respect to the last setter call.
//!
//! ```text
//!   scroll_offset ─┐
//!                  ▼
//!   ┌──── overscan ────┐
//!   │  visible rows    │  viewport_extent
//!   └──── overscan ────┘
//! ```
//!
//! The number of materialized rows depends on the viewport and overscan only,
//! never on `count`.

mod extent;

pub use extent::{ExtentFn, ItemExtent};

use extent::Layout;
use std::ops::RangeInclusive;

/// Scroll container state for a uniformly sized list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_offset: f64,
    pub viewport_extent: f64,
    pub item_extent: f64,
    pub overscan: usize,
    pub count: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_extent: crate::constants::VIEWPORT_EXTENT,
            item_extent: crate::constants::ITEM_EXTENT,
            overscan: crate::constants::OVERSCAN,
            count: 0,
        }
    }
}

/// A materialized row: index plus absolute position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    pub index: usize,
    /// Distance from the top of the scroll content
    pub start: f64,
    pub size: f64,
}

impl VirtualItem {
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// Viewport windowing engine
#[derive(Debug, Clone)]
pub struct Windower {
    layout: Layout,
    viewport_extent: f64,
    scroll_offset: f64,
    overscan: usize,
    /// Rows intersecting the viewport, `[0, 0]` when empty
    visible: (usize, usize),
    /// Visible rows expanded by overscan
    items: Vec<VirtualItem>,
}

impl Windower {
    pub fn new(extent: ItemExtent, viewport_extent: f64, overscan: usize) -> Self {
        let mut windower = Self {
            layout: Layout::new(extent, 0),
            viewport_extent: sanitize_viewport(viewport_extent),
            scroll_offset: 0.0,
            overscan,
            visible: (0, 0),
            items: Vec::new(),
        };
        windower.recompute();
        windower
    }

    /// Build from a uniform viewport description
    pub fn from_viewport(viewport: Viewport) -> Self {
        let mut windower = Self::new(
            ItemExtent::Uniform(viewport.item_extent),
            viewport.viewport_extent,
            viewport.overscan,
        );
        windower.layout.resize(viewport.count);
        windower.scroll_offset = viewport.scroll_offset;
        windower.recompute();
        windower
    }

    // ==================== Getters ====================

    pub fn count(&self) -> usize {
        self.layout.count()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn item_extent(&self) -> &ItemExtent {
        self.layout.extent()
    }

    /// Sum of all item extents
    pub fn total_extent(&self) -> f64 {
        self.layout.total()
    }

    /// Inclusive range of rows intersecting the viewport
    pub fn visible_range(&self) -> (usize, usize) {
        self.visible
    }

    /// Inclusive range of materialized rows, including overscan
    pub fn materialized_range(&self) -> (usize, usize) {
        match (self.items.first(), self.items.last()) {
            (Some(first), Some(last)) => (first.index, last.index),
            _ => (0, 0),
        }
    }

    /// Materialized rows in index order
    pub fn items(&self) -> &[VirtualItem] {
        &self.items
    }

    /// Indices of materialized rows
    pub fn indices(&self) -> RangeInclusive<usize> {
        let (first, last) = self.materialized_range();
        if self.items.is_empty() {
            // Empty inclusive range
            1..=0
        } else {
            first..=last
        }
    }

    /// Largest offset that keeps the viewport inside the content
    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_extent() - self.viewport_extent).max(0.0)
    }

    // ==================== Mutations ====================

    pub fn set_count(&mut self, count: usize) {
        if count != self.layout.count() {
            self.layout.resize(count);
        }
        self.recompute();
    }

    pub fn set_item_extent(&mut self, extent: ItemExtent) {
        self.layout.set_extent(extent);
        self.recompute();
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
        self.recompute();
    }

    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = sanitize_viewport(extent);
        self.recompute();
    }

    /// Scroll to an absolute offset, clamped to the content
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
        self.recompute();
    }

    /// Bring item `index` into view with minimal motion and return the new offset.
    ///
    /// An item already fully visible leaves the offset untouched; otherwise the
    /// viewport moves just far enough to align the nearer edge. An item at least
    /// as tall as the viewport counts as visible while any part of it is on
    /// screen, and is aligned to its start when it is not.
    pub fn scroll_to_index(&mut self, index: usize) -> f64 {
        if self.count() == 0 {
            self.set_scroll_offset(0.0);
            return self.scroll_offset;
        }
        let index = index.min(self.count() - 1);
        let start = self.layout.start(index);
        let size = self.layout.size(index);
        let end = start + size;
        let view_end = self.scroll_offset + self.viewport_extent;

        if size >= self.viewport_extent {
            let overlaps = start < view_end && end > self.scroll_offset;
            if !overlaps {
                self.set_scroll_offset(start);
            }
        } else if start < self.scroll_offset {
            self.set_scroll_offset(start);
        } else if end > view_end {
            self.set_scroll_offset(end - self.viewport_extent);
        }
        self.scroll_offset
    }

    /// Recompute the window from current inputs; idempotent
    fn recompute(&mut self) {
        self.scroll_offset = if self.scroll_offset.is_finite() {
            self.scroll_offset.clamp(0.0, self.max_scroll_offset())
        } else {
            0.0
        };
        self.items.clear();

        let count = self.layout.count();
        if count == 0 {
            self.visible = (0, 0);
            return;
        }

        let first = self.layout.index_at(self.scroll_offset);
        let view_end = self.scroll_offset + self.viewport_extent;
        let mut last = first;
        while last + 1 < count && self.layout.start(last + 1) < view_end {
            last += 1;
        }
        self.visible = (first, last);

        let start = first.saturating_sub(self.overscan);
        let end = last.saturating_add(self.overscan).min(count - 1);
        self.items.extend((start..=end).map(|index| VirtualItem {
            index,
            start: self.layout.start(index),
            size: self.layout.size(index),
        }));
    }
}

impl Default for Windower {
    fn default() -> Self {
        Self::from_viewport(Viewport::default())
    }
}

fn sanitize_viewport(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windower(count: usize) -> Windower {
        Windower::from_viewport(Viewport {
            count,
            ..Viewport::default()
        })
    }

    #[test]
    fn test_empty_window() {
        let w = windower(0);
        assert_eq!(w.visible_range(), (0, 0));
        assert_eq!(w.materialized_range(), (0, 0));
        assert!(w.items().is_empty());
        assert_eq!(w.total_extent(), 0.0);
        assert_eq!(w.indices().count(), 0);
    }

    #[test]
    fn test_initial_window_with_overscan() {
        // 400px viewport / 80px rows = rows 0..=4 visible, +5 overscan below
        let w = windower(1_000);
        assert_eq!(w.visible_range(), (0, 4));
        assert_eq!(w.materialized_range(), (0, 9));
        assert_eq!(w.items().len(), 10);
        assert_eq!(w.total_extent(), 80_000.0);
    }

    #[test]
    fn test_window_after_scroll() {
        let mut w = windower(1_000);
        w.set_scroll_offset(8_000.0);
        assert_eq!(w.visible_range(), (100, 104));
        assert_eq!(w.materialized_range(), (95, 109));
        let first = w.items()[0];
        assert_eq!(first.index, 95);
        assert_eq!(first.start, 7_600.0);
        assert_eq!(first.size, 80.0);
    }

    #[test]
    fn test_partial_rows_are_visible() {
        let mut w = windower(1_000);
        w.set_scroll_offset(40.0);
        assert_eq!(w.visible_range(), (0, 5));
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut w = windower(10);
        w.set_scroll_offset(1e9);
        assert_eq!(w.scroll_offset(), 400.0);
        assert_eq!(w.visible_range(), (5, 9));
        w.set_scroll_offset(-50.0);
        assert_eq!(w.scroll_offset(), 0.0);
        w.set_scroll_offset(f64::NAN);
        assert_eq!(w.scroll_offset(), 0.0);
    }

    #[test]
    fn test_short_list_fits_viewport() {
        let w = windower(3);
        assert_eq!(w.visible_range(), (0, 2));
        assert_eq!(w.items().len(), 3);
        assert_eq!(w.max_scroll_offset(), 0.0);
    }

    #[test]
    fn test_count_change_recomputes() {
        let mut w = windower(1_000);
        w.set_scroll_offset(40_000.0);
        w.set_count(20);
        assert_eq!(w.scroll_offset(), 1_200.0);
        assert_eq!(w.visible_range(), (15, 19));
        w.set_count(0);
        assert_eq!(w.visible_range(), (0, 0));
    }

    #[test]
    fn test_overscan_change_recomputes() {
        let mut w = windower(1_000);
        w.set_scroll_offset(8_000.0);
        w.set_overscan(0);
        assert_eq!(w.materialized_range(), (100, 104));
    }

    #[test]
    fn test_scroll_to_index_minimal_motion() {
        let mut w = windower(1_000);
        // Already visible: no motion
        assert_eq!(w.scroll_to_index(3), 0.0);
        // Below the viewport: align bottom edge
        assert_eq!(w.scroll_to_index(20), 20.0 * 80.0 + 80.0 - 400.0);
        assert!(w.visible_range().1 >= 20);
        // Above the viewport: align top edge
        assert_eq!(w.scroll_to_index(2), 160.0);
        assert_eq!(w.visible_range().0, 2);
        // Out of range clamps to last item
        w.scroll_to_index(5_000);
        assert_eq!(w.visible_range().1, 999);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut w = windower(500);
        w.set_scroll_offset(1_234.0);
        let before = w.items().to_vec();
        w.set_scroll_offset(1_234.0);
        w.set_count(500);
        assert_eq!(w.items(), before.as_slice());
    }

    #[test]
    fn test_estimated_extents() {
        let mut w = Windower::new(
            ItemExtent::estimated(|i| if i < 10 { 40.0 } else { 200.0 }),
            400.0,
            1,
        );
        w.set_count(100);
        assert_eq!(w.total_extent(), 10.0 * 40.0 + 90.0 * 200.0);
        assert_eq!(w.visible_range(), (0, 9));
        w.set_scroll_offset(400.0);
        assert_eq!(w.visible_range(), (10, 11));
        assert_eq!(w.materialized_range(), (9, 12));
    }

    #[test]
    fn test_scroll_to_index_item_taller_than_viewport() {
        let mut w = Windower::new(ItemExtent::Uniform(80.0), 40.0, 0);
        w.set_count(100);

        // Off screen below: align to the item's start, then stay put
        assert_eq!(w.scroll_to_index(5), 400.0);
        assert_eq!(w.scroll_to_index(5), 400.0);
        assert_eq!(w.visible_range(), (5, 5));

        // Partially on screen counts as visible
        w.set_scroll_offset(440.0);
        assert_eq!(w.scroll_to_index(5), 440.0);
        assert_eq!(w.scroll_to_index(5), 440.0);

        // Off screen above: align to the item's start
        w.set_scroll_offset(600.0);
        assert_eq!(w.scroll_to_index(5), 400.0);
    }

    #[test]
    fn test_materialized_count_independent_of_count() {
        let small = windower(1_000);
        let large = windower(1_000_000);
        assert_eq!(small.items().len(), large.items().len());
    }
}
