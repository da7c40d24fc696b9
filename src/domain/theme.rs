//! Theme - Vocabulary Tables for Synthetic Items

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Closed set of data themes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Ecommerce,
    Social,
    Logs,
    Tasks,
}

/// Fixed word lists the generator samples from
#[derive(Debug)]
pub struct Vocabulary {
    pub titles: &'static [&'static str],
    pub subtitles: &'static [&'static str],
    pub categories: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub avatar: &'static str,
}

static ECOMMERCE: Vocabulary = Vocabulary {
    titles: &[
        "Wireless Headphones",
        "Ceramic Pour-Over Kettle",
        "Merino Wool Sweater",
        "Mechanical Keyboard",
        "Trail Running Shoes",
        "Cast Iron Skillet",
        "Standing Desk Frame",
        "Noise Machine",
        "Leather Card Wallet",
        "Smart Desk Lamp",
    ],
    subtitles: &[
        "Free shipping on orders over $50",
        "Only a few left in stock",
        "Ships within 24 hours",
        "Customer favourite this month",
        "Back in stock",
        "New arrival",
    ],
    categories: &["Electronics", "Kitchen", "Apparel", "Outdoors", "Home Office"],
    tags: &["sale", "bestseller", "eco", "limited", "bundle", "new"],
    avatar: "🛒",
};

static SOCIAL: Vocabulary = Vocabulary {
    titles: &[
        "Just shipped a side project",
        "Sunset from the ridge trail",
        "Hot take on tabs vs spaces",
        "Weekend sourdough attempt #4",
        "Conference talk slides are up",
        "Anyone else seeing this outage?",
        "Reading list for the winter",
        "First marathon finished",
    ],
    subtitles: &[
        "@ada replied to your post",
        "Trending in Technology",
        "Shared by 12 people you follow",
        "Posted from the mobile app",
        "Edited",
    ],
    categories: &["Updates", "Photos", "Discussion", "Events", "Links"],
    tags: &["tech", "travel", "food", "fitness", "music", "books", "meme"],
    avatar: "👤",
};

static LOGS: Vocabulary = Vocabulary {
    titles: &[
        "GET /api/orders 200",
        "POST /api/login 401",
        "Connection pool exhausted",
        "Cache miss ratio above threshold",
        "Worker restarted after panic",
        "Scheduled job completed",
        "TLS handshake timeout",
        "Disk usage at 85%",
    ],
    subtitles: &[
        "service=gateway region=eu-west-1",
        "service=auth region=us-east-1",
        "service=billing region=ap-south-1",
        "service=search region=us-west-2",
        "service=worker region=eu-central-1",
    ],
    categories: &["INFO", "WARN", "ERROR", "DEBUG"],
    tags: &["http", "db", "cache", "auth", "cron", "network", "storage"],
    avatar: "📜",
};

static TASKS: Vocabulary = Vocabulary {
    titles: &[
        "Review pull request",
        "Update onboarding docs",
        "Fix flaky integration test",
        "Plan sprint retrospective",
        "Rotate API credentials",
        "Triage support backlog",
        "Draft quarterly roadmap",
        "Upgrade build toolchain",
    ],
    subtitles: &[
        "Assigned to you",
        "Due tomorrow",
        "Blocked by another task",
        "In review",
        "Unassigned",
    ],
    categories: &["Backlog", "In Progress", "Review", "Done"],
    tags: &["frontend", "backend", "urgent", "chore", "bug", "docs"],
    avatar: "✅",
};

impl Theme {
    /// All themes in display order
    pub const ALL: [Theme; 4] = [Theme::Ecommerce, Theme::Social, Theme::Logs, Theme::Tasks];

    /// Lowercase identifier used in config files
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Ecommerce => "ecommerce",
            Theme::Social => "social",
            Theme::Logs => "logs",
            Theme::Tasks => "tasks",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Theme::Ecommerce => "E-commerce",
            Theme::Social => "Social Feed",
            Theme::Logs => "Log Viewer",
            Theme::Tasks => "Task List",
        }
    }

    /// Seed discriminant mixed into every item seed
    pub fn discriminant(self) -> u32 {
        self.as_str().as_bytes()[0] as u32
    }

    /// Vocabulary table backing this theme
    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            Theme::Ecommerce => &ECOMMERCE,
            Theme::Social => &SOCIAL,
            Theme::Logs => &LOGS,
            Theme::Tasks => &TASKS,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Invalid {
                message: format!("Unknown theme: {s}"),
            })
    }
}
