//! Config - Lab Configuration

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATASET_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_SIMULATION_SECS, ITEM_EXTENT, OVERSCAN,
    PAGE_SIZES, VIEWPORT_EXTENT,
};
use crate::domain::network::{NetworkDelays, NetworkProfile};
use crate::domain::strategy::StrategyKind;
use crate::domain::theme::Theme;
use crate::error::{Error, Result};

/// The read-mostly control tuple shared by every strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub dataset_size: usize,
    pub theme: Theme,
    pub network: NetworkProfile,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            dataset_size: DEFAULT_DATASET_SIZE,
            theme: Theme::default(),
            network: NetworkProfile::default(),
        }
    }
}

/// Scroll container geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Scroll container extent in pixels
    pub extent: f64,
    /// Fixed row extent in pixels
    pub item_extent: f64,
    /// Rows rendered beyond each edge
    pub overscan: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            extent: VIEWPORT_EXTENT,
            item_extent: ITEM_EXTENT,
            overscan: OVERSCAN,
        }
    }
}

/// Main lab configuration, persisted as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Initial controls
    pub controls: Controls,
    /// Strategy shown first
    pub active_strategy: StrategyKind,
    /// Initial pagination page size
    pub page_size: usize,
    /// Viewport geometry shared by all strategies
    pub viewport: ViewportConfig,
    /// Simulated latency per network profile
    pub delays: NetworkDelays,
    /// Demo sweep duration in seconds
    pub simulation_secs: u64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            controls: Controls::default(),
            active_strategy: StrategyKind::default(),
            page_size: DEFAULT_PAGE_SIZE,
            viewport: ViewportConfig::default(),
            delays: NetworkDelays::default(),
            simulation_secs: DEFAULT_SIMULATION_SECS,
        }
    }
}

impl LabConfig {
    /// Reject geometry the windowing engine cannot lay out
    pub fn validate(&self) -> Result<()> {
        let viewport = &self.viewport;
        if !(viewport.extent.is_finite() && viewport.extent > 0.0) {
            return Err(Error::Invalid {
                message: format!("viewport extent must be positive, got {}", viewport.extent),
            });
        }
        if !(viewport.item_extent.is_finite() && viewport.item_extent > 0.0) {
            return Err(Error::Invalid {
                message: format!(
                    "item extent must be positive, got {}",
                    viewport.item_extent
                ),
            });
        }
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(Error::Invalid {
                message: format!(
                    "page size must be one of {:?}, got {}",
                    PAGE_SIZES, self.page_size
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        LabConfig::default().validate().expect("default config");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LabConfig = toml::from_str(
            r#"
            page_size = 50

            [controls]
            theme = "logs"
            network = "slow"
            "#,
        )
        .expect("parse config");

        assert_eq!(config.page_size, 50);
        assert_eq!(config.controls.theme, Theme::Logs);
        assert_eq!(config.controls.network, NetworkProfile::Slow);
        assert_eq!(config.controls.dataset_size, DEFAULT_DATASET_SIZE);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut config = LabConfig::default();
        config.viewport.item_extent = 0.0;
        assert!(config.validate().is_err());

        let mut config = LabConfig::default();
        config.page_size = 7;
        assert!(config.validate().is_err());
    }
}
