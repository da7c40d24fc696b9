//! Hybrid - Progressive Loading under a Window
//!
//! Loads in batches like infinite scroll but only materializes the rows around
//! the viewport. The next batch is prefetched once the last visible row comes
//! within [`NEAR_END_THRESHOLD`] rows of the loaded edge.

use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

use super::{ListStatus, Strategy, progressive_status};
use crate::constants::{HYBRID_SCROLL_BATCH, NEAR_END_THRESHOLD};
use crate::domain::{Controls, NetworkDelays, StrategyKind, ViewportConfig};
use crate::services::{BatchLoader, Scheduler};
use crate::windowing::{ItemExtent, Windower};

#[derive(Debug)]
pub struct Hybrid {
    controls: Controls,
    loader: BatchLoader,
    /// Window over the loaded prefix only
    windower: Windower,
    threshold: usize,
}

impl Hybrid {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        delays: NetworkDelays,
        viewport: ViewportConfig,
        controls: Controls,
    ) -> Self {
        let mut hybrid = Self {
            controls,
            loader: BatchLoader::new("hybrid", scheduler, HYBRID_SCROLL_BATCH, delays),
            windower: Windower::new(
                ItemExtent::Uniform(viewport.item_extent),
                viewport.extent,
                viewport.overscan,
            ),
            threshold: NEAR_END_THRESHOLD,
        };
        hybrid.reset();
        hybrid
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

    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    /// Whether the last visible row is within the threshold of the loaded edge
    pub fn near_end(&self) -> bool {
        let (_, last_visible) = self.windower.visible_range();
        last_visible + self.threshold >= self.loader.loaded_count()
    }

    fn reset(&mut self) {
        self.loader
            .configure(self.controls.dataset_size, self.controls.network);
        self.windower.set_count(0);
        self.windower.set_scroll_offset(0.0);
        self.evaluate();
    }

    fn evaluate(&mut self) {
        if self.near_end() && self.loader.has_more() {
            let outcome = self.loader.request_more();
            debug!(
                loaded = self.loader.loaded_count(),
                last_visible = self.windower.visible_range().1,
                outcome = ?outcome,
                "Near end of loaded rows"
            );
        }
    }
}

impl Strategy for Hybrid {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Hybrid
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
            self.windower.set_count(self.loader.loaded_count());
            self.evaluate();
        }
        applied
    }

    fn viewport_scrolled(&mut self, offset: f64) {
        self.windower.set_scroll_offset(offset);
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
        match self.windower.items() {
            [] => 0..0,
            [only] => only.index..only.index + 1,
            [first, .., last] => first.index..last.index + 1,
        }
    }

    fn items_loaded(&self) -> usize {
        self.loader.loaded_count()
    }

    fn visible_range(&self) -> (usize, usize) {
        self.windower.materialized_range()
    }

    fn status(&self) -> ListStatus {
        progressive_status(&self.controls, &self.loader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkProfile, Theme};
    use crate::services::ManualScheduler;

    fn hybrid(size: usize, network: NetworkProfile) -> (Hybrid, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let hybrid = Hybrid::new(
            scheduler.clone(),
            NetworkDelays::default(),
            ViewportConfig::default(),
            Controls {
                dataset_size: size,
                theme: Theme::Ecommerce,
                network,
            },
        );
        (hybrid, scheduler)
    }

    fn settle(hybrid: &mut Hybrid, scheduler: &ManualScheduler) {
        while scheduler.run_until_idle() > 0 {
            hybrid.pump();
        }
    }

    #[test]
    fn test_initial_batch_then_idle() {
        let (mut hybrid, scheduler) = hybrid(10_000, NetworkProfile::Fast);
        assert_eq!(hybrid.status(), ListStatus::InitialLoading);

        settle(&mut hybrid, &scheduler);
        assert_eq!(hybrid.loaded_count(), 50);
        assert_eq!(hybrid.windower().count(), 50);
        assert!(!hybrid.near_end());
        assert_eq!(hybrid.visible_range(), (0, 9));
        assert_eq!(hybrid.metrics().items_loaded, 50);
    }

    #[test]
    fn test_prefetch_at_threshold() {
        let (mut hybrid, scheduler) = hybrid(10_000, NetworkProfile::Fast);
        settle(&mut hybrid, &scheduler);

        // Rows 35..=39 on screen: 39 + 10 < 50
        hybrid.viewport_scrolled(35.0 * 80.0);
        assert_eq!(hybrid.windower().visible_range(), (35, 39));
        assert_eq!(scheduler.pending(), 0);

        // Rows 36..=40 on screen: 40 + 10 >= 50
        hybrid.viewport_scrolled(36.0 * 80.0);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(hybrid.status(), ListStatus::LoadingMore);

        settle(&mut hybrid, &scheduler);
        assert_eq!(hybrid.loaded_count(), 100);
    }

    #[test]
    fn test_materialized_rows_stay_bounded() {
        let (mut hybrid, scheduler) = hybrid(10_000, NetworkProfile::Fast);
        for step in 0..40 {
            settle(&mut hybrid, &scheduler);
            hybrid.viewport_scrolled(step as f64 * 2_000.0);
        }
        settle(&mut hybrid, &scheduler);

        assert!(hybrid.loaded_count() > 50);
        assert!(hybrid.rows().len() <= 15);
    }

    #[test]
    fn test_pause_and_unpause() {
        let (mut hybrid, scheduler) = hybrid(10_000, NetworkProfile::Fast);
        settle(&mut hybrid, &scheduler);

        hybrid.set_paused(true);
        hybrid.viewport_scrolled(10_000.0);
        assert_eq!(scheduler.pending(), 0);

        hybrid.set_paused(false);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_offline() {
        let (mut hybrid, scheduler) = hybrid(10_000, NetworkProfile::Offline);
        settle(&mut hybrid, &scheduler);
        assert_eq!(hybrid.loaded_count(), 0);
        assert_eq!(hybrid.status(), ListStatus::Offline);
        assert!(!hybrid.has_more());
    }
}
