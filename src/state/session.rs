//! Session - Context Object for One Comparison Run
//!
//! Owns the control tuple, the four strategy controllers, the metrics board,
//! the current recommendation and the active strategy.
//!
//! ```text
//! set_controls() ──► configure every strategy ──► recommend() ──► notify
//! pump()         ──► apply completed batches  ──► refresh metrics ──► notify
//! ```

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{Controls, LabConfig, NetworkProfile, StrategyKind, StrategyMetrics, Theme};
use crate::error::Result;
use crate::eventing::SessionEvent;
use crate::recommend::{Recommendation, recommend};
use crate::services::Scheduler;
use crate::state::MetricsBoard;
use crate::strategies::{Hybrid, InfiniteScroll, Pagination, Strategy, VirtualList};

pub struct Session {
    /// Configuration the session was built from; `reset_all` returns here
    config: LabConfig,
    controls: Controls,
    active: StrategyKind,
    pagination: Pagination,
    infinite: InfiniteScroll,
    virtual_list: VirtualList,
    hybrid: Hybrid,
    board: MetricsBoard,
    recommendation: Recommendation,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl Session {
    pub fn new(config: LabConfig, scheduler: Arc<dyn Scheduler>) -> Result<Self> {
        config.validate()?;
        let controls = config.controls;
        let delays = config.delays;
        let viewport = config.viewport;

        let mut session = Self {
            controls,
            active: config.active_strategy,
            pagination: Pagination::new(scheduler.clone(), delays, config.page_size, controls),
            infinite: InfiniteScroll::new(scheduler.clone(), delays, viewport, controls),
            virtual_list: VirtualList::new(viewport, controls),
            hybrid: Hybrid::new(scheduler, delays, viewport, controls),
            board: MetricsBoard::new(),
            recommendation: recommend(controls.dataset_size, controls.network, controls.theme),
            subscribers: Vec::new(),
            config,
        };
        session.refresh_metrics();
        info!(
            dataset_size = controls.dataset_size,
            theme = %controls.theme,
            network = %controls.network,
            "Session started"
        );
        Ok(session)
    }

    // ==================== Getters ====================

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn active_strategy(&self) -> StrategyKind {
        self.active
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    pub fn board(&self) -> &MetricsBoard {
        &self.board
    }

    pub fn metrics(&self, kind: StrategyKind) -> Option<StrategyMetrics> {
        self.board.get(kind)
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn infinite(&self) -> &InfiniteScroll {
        &self.infinite
    }

    pub fn virtual_list(&self) -> &VirtualList {
        &self.virtual_list
    }

    pub fn hybrid(&self) -> &Hybrid {
        &self.hybrid
    }

    pub fn strategy(&self, kind: StrategyKind) -> &dyn Strategy {
        match kind {
            StrategyKind::Pagination => &self.pagination,
            StrategyKind::Infinite => &self.infinite,
            StrategyKind::Virtual => &self.virtual_list,
            StrategyKind::Hybrid => &self.hybrid,
        }
    }

    fn strategy_mut(&mut self, kind: StrategyKind) -> &mut dyn Strategy {
        match kind {
            StrategyKind::Pagination => &mut self.pagination,
            StrategyKind::Infinite => &mut self.infinite,
            StrategyKind::Virtual => &mut self.virtual_list,
            StrategyKind::Hybrid => &mut self.hybrid,
        }
    }

    // ==================== Subscriptions ====================

    /// Receive every future session event
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: SessionEvent) {
        debug!(event = event.name(), subscribers = self.subscribers.len(), "Session event");
        // Dropped receivers unsubscribe
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    // ==================== Controls ====================

    pub fn set_dataset_size(&mut self, dataset_size: usize) {
        self.set_controls(Controls {
            dataset_size,
            ..self.controls
        });
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.set_controls(Controls {
            theme,
            ..self.controls
        });
    }

    pub fn set_network(&mut self, network: NetworkProfile) {
        self.set_controls(Controls {
            network,
            ..self.controls
        });
    }

    /// Replace the control tuple; resets every strategy when it changed
    pub fn set_controls(&mut self, controls: Controls) {
        if controls == self.controls {
            return;
        }
        info!(
            dataset_size = controls.dataset_size,
            theme = %controls.theme,
            network = %controls.network,
            "Controls changed"
        );
        self.controls = controls;
        for kind in StrategyKind::ALL {
            self.strategy_mut(kind).configure(controls);
        }
        self.notify(SessionEvent::ControlsChanged { controls });
        self.update_recommendation();
        self.refresh_metrics();
    }

    fn update_recommendation(&mut self) {
        let recommendation = recommend(
            self.controls.dataset_size,
            self.controls.network,
            self.controls.theme,
        );
        if recommendation != self.recommendation {
            info!(
                strategy = %recommendation.strategy,
                confidence = %recommendation.confidence,
                "Recommendation changed"
            );
            self.recommendation = recommendation;
            self.notify(SessionEvent::RecommendationChanged { recommendation });
        }
    }

    // ==================== Strategy Inputs ====================

    pub fn set_active_strategy(&mut self, strategy: StrategyKind) {
        if strategy == self.active {
            return;
        }
        info!(strategy = %strategy, "Active strategy changed");
        self.active = strategy;
        self.notify(SessionEvent::ActiveStrategyChanged { strategy });
    }

    /// Switch to the recommended strategy
    pub fn apply_recommendation(&mut self) -> StrategyKind {
        self.set_active_strategy(self.recommendation.strategy);
        self.active
    }

    /// Forward a scroll offset to one strategy
    pub fn scroll(&mut self, kind: StrategyKind, offset: f64) {
        self.strategy_mut(kind).viewport_scrolled(offset);
        self.refresh(kind);
    }

    /// Toggle auto-loading for one strategy; returns whether the flag changed
    pub fn set_paused(&mut self, kind: StrategyKind, paused: bool) -> bool {
        let changed = self.strategy_mut(kind).set_paused(paused);
        if changed {
            info!(strategy = %kind, paused, "Pause toggled");
            self.refresh(kind);
        }
        changed
    }

    /// Navigate the pagination strategy; returns the page selected
    pub fn page_requested(&mut self, page: usize) -> usize {
        let page = self.pagination.page_requested(page);
        self.refresh(StrategyKind::Pagination);
        page
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        self.pagination.set_page_size(page_size)?;
        self.refresh(StrategyKind::Pagination);
        Ok(())
    }

    /// Apply completed batches everywhere; returns whether any strategy changed
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        for kind in StrategyKind::ALL {
            if self.strategy_mut(kind).pump() {
                self.refresh(kind);
                changed = true;
            }
        }
        changed
    }

    /// Restore the configuration the session was built with
    pub fn reset_all(&mut self) {
        info!("Resetting session");
        let config = self.config.clone();
        // Unpause before reconfiguring so a no-op control change still clears it
        for kind in StrategyKind::ALL {
            self.strategy_mut(kind).set_paused(false);
        }
        if let Err(e) = self.pagination.set_page_size(config.page_size) {
            debug!(error = %e, "Keeping current page size");
        }
        self.board.clear();
        self.set_active_strategy(config.active_strategy);
        if config.controls == self.controls {
            for kind in StrategyKind::ALL {
                self.strategy_mut(kind).configure(config.controls);
            }
            self.refresh_metrics();
        } else {
            self.set_controls(config.controls);
        }
    }

    // ==================== Metrics ====================

    fn refresh(&mut self, kind: StrategyKind) {
        let metrics = self.strategy(kind).metrics();
        self.board.record(kind, metrics);
        self.notify(SessionEvent::MetricsUpdated {
            strategy: kind,
            metrics,
        });
    }

    /// Re-measure every strategy
    pub fn refresh_metrics(&mut self) {
        for kind in StrategyKind::ALL {
            self.refresh(kind);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("controls", &self.controls)
            .field("active", &self.active)
            .field("recommendation", &self.recommendation.strategy)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
