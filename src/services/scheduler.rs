//! Scheduler - Cancellable Delayed Tasks
//!
//! `schedule(delay) -> handle; cancel(handle)`. Loaders never sleep; they ask a
//! scheduler to run a completion later and cancel it on reset.
//!
//! Two implementations:
//! - [`TokioScheduler`]: real timers on the shared tokio runtime
//! - [`ManualScheduler`]: a virtual clock advanced explicitly, for deterministic tests

use ahash::AHashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;

use crate::services::runtime::spawn_delayed;

/// Work run when a timer fires
pub type TaskFn = Box<dyn FnOnce() + Send + 'static>;

/// Identifies a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of delayed, cancellable callbacks
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`
    fn schedule(&self, delay: Duration, task: TaskFn) -> TaskHandle;

    /// Prevent a pending task from running; returns whether it was still pending
    fn cancel(&self, handle: TaskHandle) -> bool;

    /// Number of tasks that have not fired or been cancelled
    fn pending(&self) -> usize;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ==================== Tokio ====================

/// Scheduler backed by `tokio::time::sleep`
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: AtomicU64,
    tasks: Arc<Mutex<AHashMap<u64, AbortHandle>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: TaskFn) -> TaskHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let tasks = self.tasks.clone();

        // Hold the map while spawning so the task cannot deregister before it is registered
        let mut guard = lock(&self.tasks);
        let abort = spawn_delayed(delay, move || {
            lock(&tasks).remove(&id);
            task();
        });
        guard.insert(id, abort);

        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        match lock(&self.tasks).remove(&handle.0) {
            Some(abort) => {
                abort.abort();
                true
            }
            None => false,
        }
    }

    fn pending(&self) -> usize {
        lock(&self.tasks).len()
    }
}

// ==================== Manual ====================

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    /// Ordered by due time, then by scheduling order
    due: BTreeMap<(Duration, u64), TaskFn>,
    index: AHashMap<u64, Duration>,
}

/// Scheduler driven by an explicit virtual clock
///
/// Tasks only run inside [`ManualScheduler::advance`], on the caller's thread,
/// in due-time order.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        lock(&self.queue).now
    }

    /// Move the clock forward, running every task that comes due
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = lock(&self.queue).now + by;
        let mut ran = 0;
        loop {
            // Pop under the lock, run outside it so tasks may schedule more work
            let next = {
                let mut queue = lock(&self.queue);
                let due_key = queue
                    .due
                    .keys()
                    .next()
                    .copied()
                    .filter(|(due, _)| *due <= target);
                match due_key {
                    Some(key) => {
                        queue.now = key.0;
                        queue.index.remove(&key.1);
                        queue.due.remove(&key)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    /// Advance until no task is pending
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next_due = {
                let queue = lock(&self.queue);
                queue
                    .due
                    .keys()
                    .next()
                    .map(|(due, _)| due.saturating_sub(queue.now))
            };
            match next_due {
                Some(wait) => ran += self.advance(wait),
                None => return ran,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: TaskFn) -> TaskHandle {
        let mut queue = lock(&self.queue);
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + delay;
        queue.due.insert((due, id), task);
        queue.index.insert(id, due);
        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) -> bool {
        let mut queue = lock(&self.queue);
        match queue.index.remove(&handle.0) {
            Some(due) => queue.due.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    fn pending(&self) -> usize {
        lock(&self.queue).due.len()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = lock(&self.queue);
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.due.len())
            .finish()
    }
}
