//! Recommend - Strategy Recommendation Heuristic
//!
//! Ordered rules over `(dataset_size, network, theme)`; the first match wins.
//!
//! | # | Condition                  | Result                                 |
//! |---|----------------------------|----------------------------------------|
//! | 1 | offline                    | pagination / medium                    |
//! | 2 | tasks theme, size <= 10k   | pagination / high if size <= 1k        |
//! | 3 | size >= 10k                | slow: virtual, else hybrid / high      |
//! | 4 | 1k <= size < 10k           | slow: pagination, else hybrid / medium |
//! | 5 | size <= 100                | pagination / medium                    |
//! | 6 | 100 < size < 1k            | slow: pagination, else infinite        |

use serde::Serialize;
use std::fmt;

use crate::domain::{NetworkProfile, StrategyKind, Theme};

/// How strongly the heuristic stands behind its pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Medium => f.write_str("medium"),
        }
    }
}

/// Heuristic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub strategy: StrategyKind,
    pub confidence: Confidence,
    /// One-line headline
    pub reason: &'static str,
    pub details: &'static str,
}

/// Rule (and branch) that produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Offline,
    TaskList,
    LargeSlow,
    LargeFast,
    MediumSlow,
    MediumFast,
    Tiny,
    SmallSlow,
    SmallFast,
}

struct RuleText {
    reason: &'static str,
    details: &'static str,
}

impl Rule {
    /// First rule matching the conditions
    pub fn matching(dataset_size: usize, network: NetworkProfile, theme: Theme) -> Rule {
        let slow = network == NetworkProfile::Slow;
        if network.is_offline() {
            Rule::Offline
        } else if theme == Theme::Tasks && dataset_size <= 10_000 {
            Rule::TaskList
        } else if dataset_size >= 10_000 {
            if slow { Rule::LargeSlow } else { Rule::LargeFast }
        } else if dataset_size >= 1_000 {
            if slow { Rule::MediumSlow } else { Rule::MediumFast }
        } else if dataset_size <= 100 {
            Rule::Tiny
        } else if slow {
            Rule::SmallSlow
        } else {
            Rule::SmallFast
        }
    }

    pub fn strategy(self) -> StrategyKind {
        match self {
            Rule::Offline | Rule::TaskList | Rule::MediumSlow | Rule::Tiny | Rule::SmallSlow => {
                StrategyKind::Pagination
            }
            Rule::LargeSlow => StrategyKind::Virtual,
            Rule::LargeFast | Rule::MediumFast => StrategyKind::Hybrid,
            Rule::SmallFast => StrategyKind::Infinite,
        }
    }

    fn text(self) -> RuleText {
        match self {
            Rule::Offline => RuleText {
                reason: "Best for unreliable networks",
                details: "Pagination asks for the least data per request and shows a clear empty state, \
                          so it degrades most gracefully when nothing can be fetched.",
            },
            Rule::TaskList => RuleText {
                reason: "Task lists are worked through page by page",
                details: "Task lists are scanned, acted on and revisited. Stable page positions make it \
                          easy to come back to the same item, and the page count stays manageable.",
            },
            Rule::LargeSlow => RuleText {
                reason: "Optimal for large datasets on slow networks",
                details: "Virtualization keeps the rendered node count constant regardless of dataset \
                          size and never waits on a batch while scrolling.",
            },
            Rule::LargeFast => RuleText {
                reason: "Optimal for large datasets",
                details: "Hybrid loading fetches in batches ahead of the reader and only renders the rows \
                          around the viewport, so both memory and the node count stay flat.",
            },
            Rule::MediumSlow => RuleText {
                reason: "Balanced for slow connections",
                details: "On slow networks each page arrives as a unit and the reader is never left \
                          staring at a loading row mid-scroll.",
            },
            Rule::MediumFast => RuleText {
                reason: "Best performance-to-UX ratio",
                details: "Thousands of items on a fast network load quickly in batches while the window \
                          keeps scrolling smooth. Plain infinite scroll would keep growing the page.",
            },
            Rule::Tiny => RuleText {
                reason: "Simplest for small datasets",
                details: "With only a handful of items every strategy performs the same. Pagination is the \
                          simplest to build and reason about.",
            },
            Rule::SmallSlow => RuleText {
                reason: "Predictable on slow networks",
                details: "Pagination lets the reader decide when to wait for more data instead of hitting \
                          a delay at the bottom of every batch.",
            },
            Rule::SmallFast => RuleText {
                reason: "Seamless browsing experience",
                details: "For moderate datasets on fast networks infinite scroll gives the most natural \
                          flow, and node growth stays manageable at this scale.",
            },
        }
    }
}

/// Recommend a strategy for the given conditions
pub fn recommend(dataset_size: usize, network: NetworkProfile, theme: Theme) -> Recommendation {
    let rule = Rule::matching(dataset_size, network, theme);
    let confidence = match rule {
        Rule::TaskList if dataset_size <= 1_000 => Confidence::High,
        Rule::LargeSlow | Rule::LargeFast => Confidence::High,
        _ => Confidence::Medium,
    };
    let RuleText { reason, details } = rule.text();

    Recommendation {
        strategy: rule.strategy(),
        confidence,
        reason,
        details,
    }
}
