//! Batch Loader
//!
//! Discloses indices `0..loaded_count` of a dataset in batches, each arriving
//! after the network profile's simulated latency.
//!
//! ```text
//!            request_more()             completion
//!   Idle ───────────────────► Loading ─────────────► Idle  (more remains)
//!                                       └──────────► Done  (exhausted)
//! ```
//!
//! `paused` is orthogonal: it blocks `Idle → Loading` but never interrupts a
//! batch already in flight. Every reset bumps a generation token; a completion
//! carrying an older generation is discarded, so a timer that escapes
//! cancellation can never touch the new state.

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{NetworkDelays, NetworkProfile};
use crate::services::scheduler::{Scheduler, TaskHandle};

/// Progress owned by one loader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadState {
    pub loaded_count: usize,
    pub in_flight: bool,
    pub paused: bool,
}

/// Coarse loader phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    /// Every item has been disclosed
    Done,
}

/// Result of [`BatchLoader::request_more`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A batch was scheduled and will arrive after `delay`
    Scheduled { delay: Duration },
    /// A batch is already pending
    InFlight,
    /// Loading is paused
    Paused,
    /// The network never resolves; nothing more is available
    Unavailable,
    /// The dataset is fully loaded
    Exhausted,
}

impl RequestOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, RequestOutcome::Scheduled { .. })
    }
}

/// Completion message sent by a fired timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTicket {
    generation: u64,
}

/// Incremental loader with single-flight guarding
pub struct BatchLoader {
    /// Owner name for logging
    name: &'static str,
    dataset_size: usize,
    network: NetworkProfile,
    delays: NetworkDelays,
    batch_size: usize,
    state: LoadState,
    generation: u64,
    pending: Option<TaskHandle>,
    scheduler: Arc<dyn Scheduler>,
    tx: Sender<BatchTicket>,
    rx: Receiver<BatchTicket>,
}

impl BatchLoader {
    pub fn new(
        name: &'static str,
        scheduler: Arc<dyn Scheduler>,
        batch_size: usize,
        delays: NetworkDelays,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            name,
            dataset_size: 0,
            network: NetworkProfile::default(),
            delays,
            batch_size: batch_size.max(1),
            state: LoadState::default(),
            generation: 0,
            pending: None,
            scheduler,
            tx,
            rx,
        }
    }

    // ==================== Getters ====================

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn loaded_count(&self) -> usize {
        self.state.loaded_count
    }

    pub fn in_flight(&self) -> bool {
        self.state.in_flight
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn dataset_size(&self) -> usize {
        self.dataset_size
    }

    pub fn network(&self) -> NetworkProfile {
        self.network
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether every item has been disclosed
    pub fn is_done(&self) -> bool {
        self.state.loaded_count >= self.dataset_size
    }

    /// Whether a future request could still disclose items
    pub fn has_more(&self) -> bool {
        !self.is_done() && !self.network.is_offline()
    }

    pub fn phase(&self) -> LoadPhase {
        if self.state.in_flight {
            LoadPhase::Loading
        } else if self.is_done() {
            LoadPhase::Done
        } else {
            LoadPhase::Idle
        }
    }

    // ==================== Control ====================

    /// Apply new controls; always resets
    pub fn configure(&mut self, dataset_size: usize, network: NetworkProfile) {
        self.dataset_size = dataset_size;
        self.network = network;
        self.reset();
    }

    /// Change the batch size; resets
    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size.max(1);
        self.reset();
    }

    /// Cancel any pending batch and return to `{0, false, false}`
    pub fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.generation += 1;
        self.state = LoadState::default();
        // Anything already queued belongs to an older generation
        let stale = self.rx.try_iter().count();
        if stale > 0 {
            debug!(loader = self.name, stale, "Dropped queued completions on reset");
        }
        debug!(
            loader = self.name,
            generation = self.generation,
            dataset_size = self.dataset_size,
            network = %self.network,
            "Loader reset"
        );
    }

    /// Set the pause flag; returns whether it changed
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.state.paused != paused;
        self.state.paused = paused;
        changed
    }

    /// Ask for the next batch
    pub fn request_more(&mut self) -> RequestOutcome {
        if self.state.in_flight {
            return RequestOutcome::InFlight;
        }
        if self.state.paused {
            return RequestOutcome::Paused;
        }
        let Some(delay) = self.delays.delay(self.network) else {
            warn!(loader = self.name, "Network offline, nothing to load");
            return RequestOutcome::Unavailable;
        };
        if self.is_done() {
            return RequestOutcome::Exhausted;
        }

        self.state.in_flight = true;
        let ticket = BatchTicket {
            generation: self.generation,
        };
        let tx = self.tx.clone();
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                // Receiver gone means the loader was dropped
                let _ = tx.send(ticket);
            }),
        );
        self.pending = Some(handle);

        debug!(
            loader = self.name,
            generation = self.generation,
            loaded = self.state.loaded_count,
            delay_ms = delay.as_millis() as u64,
            "Batch scheduled"
        );
        RequestOutcome::Scheduled { delay }
    }

    /// Apply completions that have arrived; returns how many batches were applied
    pub fn pump(&mut self) -> usize {
        let tickets: Vec<BatchTicket> = self.rx.try_iter().collect();
        tickets
            .into_iter()
            .filter(|ticket| self.complete(*ticket))
            .count()
    }

    fn complete(&mut self, ticket: BatchTicket) -> bool {
        if ticket.generation != self.generation || !self.state.in_flight {
            debug!(
                loader = self.name,
                stale_generation = ticket.generation,
                generation = self.generation,
                "Discarded stale completion"
            );
            return false;
        }

        let remaining = self.dataset_size.saturating_sub(self.state.loaded_count);
        self.state.loaded_count += self.batch_size.min(remaining);
        self.state.in_flight = false;
        self.pending = None;

        debug!(
            loader = self.name,
            loaded = self.state.loaded_count,
            total = self.dataset_size,
            "Batch applied"
        );
        true
    }
}

impl std::fmt::Debug for BatchLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchLoader")
            .field("name", &self.name)
            .field("dataset_size", &self.dataset_size)
            .field("network", &self.network)
            .field("batch_size", &self.batch_size)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::scheduler::ManualScheduler;

    const FAST: Duration = Duration::from_millis(50);

    fn loader(size: usize, network: NetworkProfile) -> (BatchLoader, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let mut loader = BatchLoader::new("test", scheduler.clone(), 20, NetworkDelays::default());
        loader.configure(size, network);
        (loader, scheduler)
    }

    #[test]
    fn test_batch_arrives_after_delay() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Fast);

        assert_eq!(loader.request_more(), RequestOutcome::Scheduled { delay: FAST });
        assert_eq!(loader.phase(), LoadPhase::Loading);

        scheduler.advance(Duration::from_millis(49));
        assert_eq!(loader.pump(), 0);
        assert_eq!(loader.loaded_count(), 0);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(loader.pump(), 1);
        assert_eq!(loader.loaded_count(), 20);
        assert_eq!(loader.phase(), LoadPhase::Idle);
    }

    #[test]
    fn test_single_flight() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Fast);

        assert!(loader.request_more().is_scheduled());
        for _ in 0..10 {
            assert_eq!(loader.request_more(), RequestOutcome::InFlight);
        }
        assert_eq!(scheduler.pending(), 1);

        scheduler.run_until_idle();
        loader.pump();
        assert_eq!(loader.loaded_count(), 20);
    }

    #[test]
    fn test_last_batch_is_partial_then_done() {
        let (mut loader, scheduler) = loader(45, NetworkProfile::Fast);

        for expected in [20, 40, 45] {
            assert!(loader.request_more().is_scheduled());
            scheduler.run_until_idle();
            loader.pump();
            assert_eq!(loader.loaded_count(), expected);
        }
        assert_eq!(loader.phase(), LoadPhase::Done);
        assert!(!loader.has_more());
        assert_eq!(loader.request_more(), RequestOutcome::Exhausted);
    }

    #[test]
    fn test_offline_never_advances() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Offline);

        for _ in 0..50 {
            assert_eq!(loader.request_more(), RequestOutcome::Unavailable);
        }
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(Duration::from_secs(3600));
        assert_eq!(loader.pump(), 0);
        assert_eq!(loader.loaded_count(), 0);
        assert!(!loader.has_more());
    }

    #[test]
    fn test_paused_blocks_requests() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Fast);

        assert!(loader.set_paused(true));
        assert!(!loader.set_paused(true));
        assert_eq!(loader.request_more(), RequestOutcome::Paused);
        assert_eq!(scheduler.pending(), 0);

        loader.set_paused(false);
        assert!(loader.request_more().is_scheduled());
    }

    #[test]
    fn test_pause_does_not_cancel_in_flight_batch() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Fast);

        loader.request_more();
        loader.set_paused(true);
        scheduler.run_until_idle();
        assert_eq!(loader.pump(), 1);
        assert_eq!(loader.loaded_count(), 20);
        assert!(loader.is_paused());
    }

    #[test]
    fn test_reset_cancels_pending_timer() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Slow);

        loader.request_more();
        loader.reset();
        assert_eq!(scheduler.pending(), 0);
        scheduler.advance(Duration::from_secs(5));
        assert_eq!(loader.pump(), 0);
        assert_eq!(loader.state(), LoadState::default());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Fast);

        loader.request_more();
        // Timer fires and queues its ticket before the reset is observed
        scheduler.run_until_idle();
        loader.reset();
        assert_eq!(loader.pump(), 0);
        assert_eq!(loader.loaded_count(), 0);

        // A ticket from an old generation arriving late is ignored too
        loader.request_more();
        let old = BatchTicket {
            generation: loader.generation() - 1,
        };
        assert!(!loader.complete(old));
        assert!(loader.in_flight());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut loader, scheduler) = loader(100, NetworkProfile::Fast);
        loader.request_more();
        scheduler.run_until_idle();
        loader.pump();
        loader.set_paused(true);

        loader.reset();
        let once = loader.state();
        loader.reset();
        assert_eq!(loader.state(), once);
        assert_eq!(once, LoadState::default());
    }

    #[test]
    fn test_empty_dataset_is_exhausted() {
        let (mut loader, _scheduler) = loader(0, NetworkProfile::Fast);
        assert_eq!(loader.request_more(), RequestOutcome::Exhausted);
        assert_eq!(loader.phase(), LoadPhase::Done);
    }
}
