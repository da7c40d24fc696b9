//! State - Session Context and Persisted Configuration
//!
//! The session is the single context object every strategy is driven through.
//! Observers hold a receiver from [`Session::subscribe`] rather than a
//! reference to the session.

mod config_store;
mod metrics_board;
mod session;

pub use config_store::*;
pub use metrics_board::*;
pub use session::*;
