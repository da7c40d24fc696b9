//! Pagination - One Page per Explicit Request

use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info};

use super::{ListStatus, Strategy, inclusive};
use crate::constants::PAGE_SIZES;
use crate::domain::{Controls, NetworkDelays, StrategyKind};
use crate::error::{Error, Result};
use crate::services::{BatchLoader, Scheduler};

/// Page-at-a-time controller
///
/// Every navigation reloads the target page through the loader, so a page
/// shows skeleton rows for one network delay before its items appear.
#[derive(Debug)]
pub struct Pagination {
    controls: Controls,
    /// Zero-based current page
    page: usize,
    page_size: usize,
    loader: BatchLoader,
}

impl Pagination {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        delays: NetworkDelays,
        page_size: usize,
        controls: Controls,
    ) -> Self {
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            crate::constants::DEFAULT_PAGE_SIZE
        };
        let mut pagination = Self {
            controls,
            page: 0,
            page_size,
            loader: BatchLoader::new("pagination", scheduler, page_size, delays),
        };
        pagination.load_page();
        pagination
    }

    // ==================== Getters ====================

    /// Zero-based current page
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.controls.dataset_size.div_ceil(self.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loader.in_flight()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// First index on the current page
    pub fn page_start(&self) -> usize {
        self.page * self.page_size
    }

    /// Number of items the current page holds once loaded
    pub fn page_len(&self) -> usize {
        self.controls
            .dataset_size
            .saturating_sub(self.page_start())
            .min(self.page_size)
    }

    // ==================== Navigation ====================

    /// Go to `page`, clamped to the valid range; returns the page selected
    pub fn page_requested(&mut self, page: usize) -> usize {
        self.page = self.clamp_page(page);
        self.load_page();
        self.page
    }

    pub fn first(&mut self) -> usize {
        self.page_requested(0)
    }

    pub fn previous(&mut self) -> usize {
        self.page_requested(self.page.saturating_sub(1))
    }

    pub fn next(&mut self) -> usize {
        self.page_requested(self.page + 1)
    }

    pub fn last(&mut self) -> usize {
        self.page_requested(self.total_pages().saturating_sub(1))
    }

    /// Change the page size and return to the first page
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(Error::Invalid {
                message: format!("page size must be one of {PAGE_SIZES:?}, got {page_size}"),
            });
        }
        info!(page_size, "Page size changed");
        self.page_size = page_size;
        self.loader.set_batch_size(page_size);
        self.page = 0;
        self.load_page();
        Ok(())
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.min(self.total_pages().saturating_sub(1))
    }

    fn load_page(&mut self) {
        self.loader.configure(self.page_len(), self.controls.network);
        let outcome = self.loader.request_more();
        debug!(
            page = self.page,
            total_pages = self.total_pages(),
            outcome = ?outcome,
            "Page requested"
        );
    }
}

impl Strategy for Pagination {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pagination
    }

    fn controls(&self) -> Controls {
        self.controls
    }

    fn configure(&mut self, controls: Controls) {
        self.controls = controls;
        self.page = self.clamp_page(self.page);
        self.load_page();
    }

    fn pump(&mut self) -> bool {
        self.loader.pump() > 0
    }

    fn materialized(&self) -> Range<usize> {
        let start = self.page_start();
        start..start + self.loader.loaded_count()
    }

    fn items_loaded(&self) -> usize {
        self.loader.loaded_count()
    }

    fn visible_range(&self) -> (usize, usize) {
        inclusive(&self.materialized())
    }

    fn status(&self) -> ListStatus {
        if self.controls.network.is_offline() {
            ListStatus::Offline
        } else if self.controls.dataset_size == 0 {
            ListStatus::Empty
        } else if self.loader.in_flight() {
            ListStatus::InitialLoading
        } else {
            ListStatus::Ready
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkProfile, Theme};
    use crate::services::ManualScheduler;

    fn controls(dataset_size: usize, network: NetworkProfile) -> Controls {
        Controls {
            dataset_size,
            theme: Theme::Ecommerce,
            network,
        }
    }

    fn pagination(size: usize, network: NetworkProfile) -> (Pagination, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let pagination = Pagination::new(
            scheduler.clone(),
            NetworkDelays::default(),
            20,
            controls(size, network),
        );
        (pagination, scheduler)
    }

    fn settle(pagination: &mut Pagination, scheduler: &ManualScheduler) {
        scheduler.run_until_idle();
        pagination.pump();
    }

    #[test]
    fn test_first_page_loads_after_delay() {
        let (mut pagination, scheduler) = pagination(1_000, NetworkProfile::Fast);
        assert_eq!(pagination.status(), ListStatus::InitialLoading);
        assert_eq!(pagination.items_loaded(), 0);

        settle(&mut pagination, &scheduler);
        assert_eq!(pagination.status(), ListStatus::Ready);
        assert_eq!(pagination.total_pages(), 50);
        assert_eq!(pagination.visible_range(), (0, 19));
        assert_eq!(pagination.rows().len(), 20);
    }

    #[test]
    fn test_navigation_clamps() {
        let (mut pagination, scheduler) = pagination(45, NetworkProfile::Fast);
        assert_eq!(pagination.total_pages(), 3);

        assert_eq!(pagination.previous(), 0);
        assert_eq!(pagination.next(), 1);
        assert_eq!(pagination.last(), 2);
        assert_eq!(pagination.next(), 2);
        assert_eq!(pagination.page_requested(99), 2);

        settle(&mut pagination, &scheduler);
        assert_eq!(pagination.page_len(), 5);
        assert_eq!(pagination.visible_range(), (40, 44));
        assert!(!pagination.has_next());
        assert!(pagination.has_previous());
        assert_eq!(pagination.first(), 0);
    }

    #[test]
    fn test_page_size_change_returns_to_first_page() {
        let (mut pagination, scheduler) = pagination(1_000, NetworkProfile::Fast);
        pagination.page_requested(7);
        pagination
            .set_page_size(50)
            .expect("50 is an allowed page size");
        settle(&mut pagination, &scheduler);

        assert_eq!(pagination.current_page(), 0);
        assert_eq!(pagination.total_pages(), 20);
        assert_eq!(pagination.visible_range(), (0, 49));
        assert!(pagination.set_page_size(30).is_err());
    }

    #[test]
    fn test_shrinking_dataset_clamps_page() {
        let (mut pagination, scheduler) = pagination(1_000, NetworkProfile::Fast);
        pagination.last();
        pagination.configure(controls(100, NetworkProfile::Fast));
        settle(&mut pagination, &scheduler);

        assert_eq!(pagination.current_page(), 4);
        assert_eq!(pagination.visible_range(), (80, 99));
    }

    #[test]
    fn test_stale_page_load_is_dropped() {
        let (mut pagination, scheduler) = pagination(1_000, NetworkProfile::Slow);
        pagination.next();
        pagination.next();
        settle(&mut pagination, &scheduler);

        assert_eq!(pagination.current_page(), 2);
        assert_eq!(pagination.visible_range(), (40, 59));
        assert_eq!(pagination.items_loaded(), 20);
    }

    #[test]
    fn test_offline_shows_nothing() {
        let (mut pagination, scheduler) = pagination(1_000, NetworkProfile::Offline);
        settle(&mut pagination, &scheduler);
        assert_eq!(pagination.status(), ListStatus::Offline);
        assert_eq!(pagination.items_loaded(), 0);
        assert_eq!(pagination.total_pages(), 50);
    }

    #[test]
    fn test_empty_dataset() {
        let (pagination, _scheduler) = pagination(0, NetworkProfile::Fast);
        assert_eq!(pagination.total_pages(), 0);
        assert_eq!(pagination.current_page(), 0);
        assert_eq!(pagination.status(), ListStatus::Empty);
        assert_eq!(pagination.visible_range(), (0, 0));
    }
}
