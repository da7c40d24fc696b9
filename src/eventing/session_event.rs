//! SessionEvent - Session Notification Enum
//!
//! Everything a [`Session`](crate::state::Session) broadcasts to subscribers.

use crate::domain::{Controls, StrategyKind, StrategyMetrics};
use crate::recommend::Recommendation;

/// Notifications for session -> observer communication
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Control tuple changed; every strategy has been reset
    ControlsChanged { controls: Controls },

    /// A strategy published a new metrics snapshot
    MetricsUpdated {
        strategy: StrategyKind,
        metrics: StrategyMetrics,
    },

    /// Recommendation recomputed to a different result
    RecommendationChanged { recommendation: Recommendation },

    /// The strategy shown to the user changed
    ActiveStrategyChanged { strategy: StrategyKind },
}

impl SessionEvent {
    /// Short name for log fields
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::ControlsChanged { .. } => "controls_changed",
            SessionEvent::MetricsUpdated { .. } => "metrics_updated",
            SessionEvent::RecommendationChanged { .. } => "recommendation_changed",
            SessionEvent::ActiveStrategyChanged { .. } => "active_strategy_changed",
        }
    }
}
