//! listlab Library
//!
//! Compares four strategies for presenting a long ordered list (pagination,
//! infinite scroll, virtualization and a hybrid of the last two) under
//! simulated dataset sizes and network conditions, and recommends one.

pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod generator;
pub mod helpers;
pub mod recommend;
pub mod services;
pub mod state;
pub mod strategies;
pub mod windowing;
