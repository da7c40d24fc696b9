//! Domain - Pure Data Structures
//!
//! These types carry no timers or channels and represent the lab's vocabulary.

pub mod config;
pub mod item;
pub mod metrics;
pub mod network;
pub mod strategy;
pub mod theme;

pub use config::{Controls, LabConfig, ViewportConfig};
pub use item::Item;
pub use metrics::{HealthStatus, StrategyMetrics};
pub use network::{NetworkDelays, NetworkProfile};
pub use strategy::{StrategyInfo, StrategyKind};
pub use theme::{Theme, Vocabulary};
