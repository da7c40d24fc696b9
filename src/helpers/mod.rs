//! Helper Utilities
//!
//! Common utilities used across the crate.

mod format;
mod fs;

pub use format::*;
pub use fs::*;
