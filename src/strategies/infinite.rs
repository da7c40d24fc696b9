//! Infinite Scroll - Sentinel-Triggered Batches
//!
//! All loaded rows stay materialized. A sentinel sits right after the last
//! loaded row; when it comes within `root_margin` of the viewport's bottom
//! edge, the next batch is requested.

use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

use super::{ListStatus, Strategy, inclusive, progressive_status};
use crate::constants::{INFINITE_SCROLL_BATCH, SENTINEL_ROOT_MARGIN};
use crate::domain::{Controls, NetworkDelays, StrategyKind, ViewportConfig};
use crate::services::{BatchLoader, Scheduler};

#[derive(Debug)]
pub struct InfiniteScroll {
    controls: Controls,
    loader: BatchLoader,
    viewport_extent: f64,
    item_extent: f64,
    /// Distance below the viewport at which the sentinel counts as visible
    root_margin: f64,
    scroll_offset: f64,
}

impl InfiniteScroll {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        delays: NetworkDelays,
        viewport: ViewportConfig,
        controls: Controls,
    ) -> Self {
        let mut infinite = Self {
            controls,
            loader: BatchLoader::new("infinite", scheduler, INFINITE_SCROLL_BATCH, delays),
            viewport_extent: viewport.extent,
            item_extent: viewport.item_extent,
            root_margin: SENTINEL_ROOT_MARGIN,
            scroll_offset: 0.0,
        };
        infinite.reset();
        infinite
    }

    pub fn has_more(&self) -> bool {
        self.loader.has_more()
    }

    pub fn is_paused(&self) -> bool {
        self.loader.is_paused()
    }

    pub fn loaded_count(&self) -> usize {
        self.loader.loaded_count()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Height of the loaded content
    pub fn content_extent(&self) -> f64 {
        self.loader.loaded_count() as f64 * self.item_extent
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent() - self.viewport_extent).max(0.0)
    }

    /// Whether the sentinel after the last loaded row intersects the grown viewport
    pub fn sentinel_in_view(&self) -> bool {
        self.content_extent() <= self.scroll_offset + self.viewport_extent + self.root_margin
    }

    fn reset(&mut self) {
        self.scroll_offset = 0.0;
        self.loader
            .configure(self.controls.dataset_size, self.controls.network);
        self.evaluate();
    }

    /// Request the next batch if the sentinel is showing
    fn evaluate(&mut self) {
        if self.sentinel_in_view() && self.loader.has_more() {
            let outcome = self.loader.request_more();
            debug!(
                loaded = self.loader.loaded_count(),
                outcome = ?outcome,
                "Sentinel in view"
            );
        }
    }
}

impl Strategy for InfiniteScroll {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Infinite
    }

    fn controls(&self) -> Controls {
        self.controls
    }

    fn configure(&mut self, controls: Controls) {
        self.controls = controls;
        self.reset();
    }

    fn pump(&mut self) -> bool {
        let applied = self.loader.pump() > 0;
        if applied {
            self.evaluate();
        }
        applied
    }

    fn viewport_scrolled(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
        self.evaluate();
    }

    fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.loader.set_paused(paused);
        if changed && !paused {
            self.evaluate();
        }
        changed
    }

    fn materialized(&self) -> Range<usize> {
        0..self.loader.loaded_count()
    }

    fn items_loaded(&self) -> usize {
        self.loader.loaded_count()
    }

    fn visible_range(&self) -> (usize, usize) {
        inclusive(&self.materialized())
    }

    fn status(&self) -> ListStatus {
        progressive_status(&self.controls, &self.loader)
    }
}
