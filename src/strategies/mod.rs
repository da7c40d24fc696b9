//! Strategies - Four Ways to Present a Long List
//!
//! Each strategy owns its own loader and/or windower and reacts to the same
//! inputs: control changes, scroll offsets, pause toggles and (for pagination)
//! explicit page requests.
//!
//! | Strategy   | Loader batch | Windower over   | Trigger              |
//! |------------|--------------|-----------------|----------------------|
//! | Pagination | page size    | -               | explicit navigation  |
//! | Infinite   | 20           | -               | sentinel near bottom |
//! | Virtual    | -            | full dataset    | -                    |
//! | Hybrid     | 50           | loaded prefix   | near-end threshold   |

mod hybrid;
mod infinite;
mod pagination;
mod virtual_list;

pub use hybrid::*;
pub use infinite::*;
pub use pagination::*;
pub use virtual_list::*;

use std::ops::Range;
use std::time::Instant;

use crate::constants::{CONTAINER_NODES, NODES_PER_ITEM, NODES_PER_SKELETON, SKELETON_ROWS};
use crate::domain::{Controls, Item, StrategyKind, StrategyMetrics};
use crate::generator::generate_batch;

/// What a strategy's shell shows above (or instead of) its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    /// Network never resolves; nothing can be shown
    Offline,
    /// First batch in flight, skeleton rows on screen
    InitialLoading,
    /// Auto-loading suspended by the user
    Paused { loaded: usize, total: usize },
    /// A follow-up batch is in flight below the loaded rows
    LoadingMore,
    /// Every item has been disclosed
    AllLoaded { total: usize },
    Ready,
    /// Dataset size is zero
    Empty,
}

impl ListStatus {
    /// Banner text for the strategy shell, `None` when nothing needs saying
    pub fn banner(&self) -> Option<String> {
        match self {
            ListStatus::Offline => Some("You are offline. Connect to load items.".to_string()),
            ListStatus::InitialLoading => Some("Loading...".to_string()),
            ListStatus::Paused { loaded, total } => Some(format!(
                "Loading paused ({} of {} loaded)",
                crate::helpers::format_number(*loaded),
                crate::helpers::format_number(*total)
            )),
            ListStatus::LoadingMore => Some("Loading more...".to_string()),
            ListStatus::AllLoaded { total } => Some(format!(
                "All {} items loaded",
                crate::helpers::format_number(*total)
            )),
            ListStatus::Ready => None,
            ListStatus::Empty => Some("No items".to_string()),
        }
    }
}

/// Common surface of every strategy controller
pub trait Strategy {
    fn kind(&self) -> StrategyKind;

    /// Current control tuple
    fn controls(&self) -> Controls;

    /// Apply new controls, resetting loader and windower state
    fn configure(&mut self, controls: Controls);

    /// Apply completed batches and re-evaluate triggers; returns whether anything changed
    fn pump(&mut self) -> bool;

    /// Scroll container moved. Strategies without scroll-driven behavior ignore it.
    fn viewport_scrolled(&mut self, _offset: f64) {}

    /// Toggle auto-loading; returns whether the flag changed
    fn set_paused(&mut self, _paused: bool) -> bool {
        false
    }

    /// Half-open index range of rows currently materialized
    fn materialized(&self) -> Range<usize>;

    /// Value reported as `items_loaded`
    fn items_loaded(&self) -> usize;

    /// Inclusive range reported in metrics, `(0, 0)` when nothing is shown
    fn visible_range(&self) -> (usize, usize);

    fn status(&self) -> ListStatus;

    /// Materialize the current rows
    fn rows(&self) -> Vec<Item> {
        let range = self.materialized();
        generate_batch(range.start, range.len(), self.controls().theme)
    }

    /// Measure the current window
    fn metrics(&self) -> StrategyMetrics {
        let started = Instant::now();
        let rows = self.rows();
        let render_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        StrategyMetrics {
            approx_dom_node_count: approx_node_count(rows.len(), self.status()),
            items_loaded: self.items_loaded(),
            render_time_ms,
            visible_range: self.visible_range(),
        }
    }
}

/// Rough element count for a shell showing `rows` item cards
pub fn approx_node_count(rows: usize, status: ListStatus) -> usize {
    let skeleton = match status {
        ListStatus::InitialLoading => SKELETON_ROWS * NODES_PER_SKELETON,
        _ => 0,
    };
    CONTAINER_NODES + rows * NODES_PER_ITEM + skeleton
}

/// Inclusive `(first, last)` for a half-open range, `(0, 0)` when empty
pub(crate) fn inclusive(range: &Range<usize>) -> (usize, usize) {
    if range.is_empty() {
        (0, 0)
    } else {
        (range.start, range.end - 1)
    }
}

/// Status shared by the two progressively loading strategies
pub(crate) fn progressive_status(
    controls: &Controls,
    loader: &crate::services::BatchLoader,
) -> ListStatus {
    if controls.network.is_offline() {
        return ListStatus::Offline;
    }
    if controls.dataset_size == 0 {
        return ListStatus::Empty;
    }
    let loaded = loader.loaded_count();
    if loaded == 0 && loader.in_flight() {
        ListStatus::InitialLoading
    } else if loader.is_paused() && !loader.is_done() {
        ListStatus::Paused {
            loaded,
            total: controls.dataset_size,
        }
    } else if loader.in_flight() {
        ListStatus::LoadingMore
    } else if loader.is_done() {
        ListStatus::AllLoaded {
            total: controls.dataset_size,
        }
    } else {
        ListStatus::Ready
    }
}
