//! Tuning Constants
//!
//! Centralized constants for the simulation: network delays, batch sizes,
//! viewport geometry and health thresholds.

/// Simulated latency for the fast network profile
pub const FAST_DELAY_MS: u64 = 50;
/// Simulated latency for the slow network profile
pub const SLOW_DELAY_MS: u64 = 1500;

/// Dataset size presets offered by the controls
pub const DATASET_PRESETS: [usize; 4] = [100, 1_000, 10_000, 100_000];
pub const DEFAULT_DATASET_SIZE: usize = 1_000;

/// Pagination page sizes
pub const PAGE_SIZES: [usize; 3] = [10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Items disclosed per batch by the infinite scroll strategy
pub const INFINITE_SCROLL_BATCH: usize = 20;
/// Items disclosed per batch by the hybrid strategy
pub const HYBRID_SCROLL_BATCH: usize = 50;

/// Fixed row extent in pixels
pub const ITEM_EXTENT: f64 = 80.0;
/// Rows rendered beyond each viewport edge
pub const OVERSCAN: usize = 5;
/// Height of each strategy's scroll container
pub const VIEWPORT_EXTENT: f64 = 400.0;

/// Hybrid prefetch fires when the last visible row is this close to the loaded edge
pub const NEAR_END_THRESHOLD: usize = 10;
/// Extra distance below the viewport at which the infinite scroll sentinel counts as visible
pub const SENTINEL_ROOT_MARGIN: f64 = 100.0;

/// Placeholder rows shown while the first batch is in flight
pub const SKELETON_ROWS: usize = 5;

/// Approximate element count of one rendered item card
pub const NODES_PER_ITEM: usize = 14;
/// Approximate element count of a skeleton row
pub const NODES_PER_SKELETON: usize = 6;
/// Elements owned by the scroll container, banners and spacers
pub const CONTAINER_NODES: usize = 3;

/// Node count below which a strategy is considered healthy
pub const HEALTH_GOOD_BELOW: usize = 200;
/// Node count below which a strategy is considered moderate
pub const HEALTH_WARN_BELOW: usize = 500;

/// Generated timestamps fall within this many days before the anchor
pub const TIMESTAMP_WINDOW_DAYS: u64 = 30;
/// Fixed "now" anchor for generated timestamps (2025-01-01T00:00:00Z)
pub const TIMESTAMP_ANCHOR_MS: i64 = 1_735_689_600_000;

/// Default wall-clock duration of the demo sweep
pub const DEFAULT_SIMULATION_SECS: u64 = 5;
