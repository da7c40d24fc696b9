//! Network - Simulated Network Profiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{FAST_DELAY_MS, SLOW_DELAY_MS};
use crate::error::Error;

/// Simulated network condition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkProfile {
    #[default]
    Fast,
    Slow,
    /// Requests never resolve
    Offline,
}

/// Per-profile latency table, overridable from config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDelays {
    pub fast_ms: u64,
    pub slow_ms: u64,
}

impl Default for NetworkDelays {
    fn default() -> Self {
        Self {
            fast_ms: FAST_DELAY_MS,
            slow_ms: SLOW_DELAY_MS,
        }
    }
}

impl NetworkDelays {
    /// Latency for a profile, `None` when the profile never resolves
    pub fn delay(&self, profile: NetworkProfile) -> Option<Duration> {
        match profile {
            NetworkProfile::Fast => Some(Duration::from_millis(self.fast_ms)),
            NetworkProfile::Slow => Some(Duration::from_millis(self.slow_ms)),
            NetworkProfile::Offline => None,
        }
    }
}

impl NetworkProfile {
    pub const ALL: [NetworkProfile; 3] = [
        NetworkProfile::Fast,
        NetworkProfile::Slow,
        NetworkProfile::Offline,
    ];

    /// Latency with the default table
    pub fn delay(self) -> Option<Duration> {
        NetworkDelays::default().delay(self)
    }

    pub fn is_offline(self) -> bool {
        self == NetworkProfile::Offline
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkProfile::Fast => "fast",
            NetworkProfile::Slow => "slow",
            NetworkProfile::Offline => "offline",
        }
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetworkProfile::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown network profile: {s}"),
            })
    }
}
