//! Service Layer
//!
//! Simulated latency and incremental loading. Nothing here performs real I/O:
//! a batch "arrives" when its timer fires.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                       BatchLoader                         │
//! │   request_more() ──schedule(delay)──► Scheduler           │
//! │        ▲                                  │               │
//! │        │ pump()         BatchTicket{gen}  ▼               │
//! │   crossbeam Receiver ◄──────────────── timer fires        │
//! └───────────────────────────────────────────────────────────┘
//!        ▲                                  ▲
//!        │                                  │
//!  TokioScheduler (runtime bridge)    ManualScheduler (virtual clock)
//! ```

mod loader;
mod runtime;
mod scheduler;

pub use loader::*;
pub use runtime::*;
pub use scheduler::*;
