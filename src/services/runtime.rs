//! Tokio Runtime Bridge
//!
//! Simulated network latency is a timer on a shared tokio runtime. The rest of
//! the lab stays synchronous: timers fire on runtime worker threads and hand
//! their result back over a channel.
//!
//! ## Pattern
//!
//! ```text
//! BatchLoader::request_more()
//!       │
//!       ▼
//! spawn_delayed(delay, task)  ──►  tokio::time::sleep(delay)
//!       │                                 │
//!       ▼                                 ▼
//! AbortHandle (cancel on reset)      task() sends BatchTicket
//! ```

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::task::AbortHandle;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("listlab-timer")
            .enable_time()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Run `task` after `delay` on the runtime
///
/// Aborting the returned handle before the delay elapses guarantees `task`
/// never runs.
pub fn spawn_delayed<F>(delay: Duration, task: F) -> AbortHandle
where
    F: FnOnce() + Send + 'static,
{
    get_runtime()
        .spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
        .abort_handle()
}

/// Block on a future synchronously (used by the demo binary's main loop)
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_spawn_delayed_runs() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        spawn_delayed(Duration::from_millis(10), move || {
            flag_clone.store(true, Ordering::SeqCst);
        });

        // Give the task time to complete
        std::thread::sleep(Duration::from_millis(200));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_aborted_task_never_runs() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        let handle = spawn_delayed(Duration::from_millis(100), move || {
            flag_clone.store(true, Ordering::SeqCst);
        });
        handle.abort();

        std::thread::sleep(Duration::from_millis(250));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_block_on_sleep() {
        let value = block_on(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            7
        });
        assert_eq!(value, 7);
    }
}
