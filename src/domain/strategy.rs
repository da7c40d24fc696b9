//! Strategy - The Four List Presentation Strategies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// List presentation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Pagination,
    Infinite,
    Virtual,
    Hybrid,
}

/// Static description of a strategy
#[derive(Debug)]
pub struct StrategyInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
}

static PAGINATION_INFO: StrategyInfo = StrategyInfo {
    label: "Pagination",
    description: "Loads a fixed page of items at a time. Node count stays constant regardless of dataset size.",
    pros: &[
        "Constant node count",
        "Predictable performance",
        "Easy to implement",
        "Addressable pages",
    ],
    cons: &[
        "Requires user interaction to see more",
        "Context switching between pages",
        "Not ideal for browsing flows",
    ],
};

static INFINITE_INFO: StrategyInfo = StrategyInfo {
    label: "Infinite Scroll",
    description: "Progressively loads items as the user scrolls down. Node count grows over time.",
    pros: &[
        "Seamless browsing experience",
        "Good for content feeds",
        "No manual page navigation",
    ],
    cons: &[
        "Node count grows unbounded",
        "Memory usage increases over time",
        "Hard to reach the footer",
        "Scroll position lost on back navigation",
    ],
};

static VIRTUAL_INFO: StrategyInfo = StrategyInfo {
    label: "Virtualization",
    description: "Only renders items visible in the viewport. Node count stays small even with 100k+ items.",
    pros: &[
        "Constant node count",
        "Handles 100k+ items",
        "Smooth scrolling performance",
        "Low memory footprint",
    ],
    cons: &[
        "More complex implementation",
        "Fixed item extent often needed",
        "Find-in-page limitations",
        "Accessibility considerations",
    ],
};

static HYBRID_INFO: StrategyInfo = StrategyInfo {
    label: "Infinite + Virtual",
    description: "Combines infinite scroll loading with virtualization. Items load progressively while only visible rows are materialized.",
    pros: &[
        "Constant node count",
        "Progressive data loading",
        "Handles 100k+ items",
        "Production-realistic pattern",
    ],
    cons: &[
        "Most complex implementation",
        "Fixed item extent needed",
        "Network-dependent initial load",
        "Find-in-page limitations",
    ],
};

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Pagination,
        StrategyKind::Infinite,
        StrategyKind::Virtual,
        StrategyKind::Hybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Pagination => "pagination",
            StrategyKind::Infinite => "infinite",
            StrategyKind::Virtual => "virtual",
            StrategyKind::Hybrid => "hybrid",
        }
    }

    pub fn info(self) -> &'static StrategyInfo {
        match self {
            StrategyKind::Pagination => &PAGINATION_INFO,
            StrategyKind::Infinite => &INFINITE_INFO,
            StrategyKind::Virtual => &VIRTUAL_INFO,
            StrategyKind::Hybrid => &HYBRID_INFO,
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown strategy: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_strategy_is_described() {
        for kind in StrategyKind::ALL {
            let info = kind.info();
            assert!(!info.description.is_empty(), "{kind} has no description");
            assert!(!info.pros.is_empty(), "{kind} has no pros");
            assert!(!info.cons.is_empty(), "{kind} has no cons");
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for kind in StrategyKind::ALL {
            let parsed: StrategyKind = kind.to_string().parse().expect("parse strategy");
            assert_eq!(parsed, kind);
        }
        assert!("carousel".parse::<StrategyKind>().is_err());
    }
}
