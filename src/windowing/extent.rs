//! Item extent models and the prefix-offset layout built from them.

use std::fmt;
use std::sync::Arc;

/// Estimator returning the extent of the item at an index
pub type ExtentFn = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// How tall each item is.
#[derive(Clone)]
pub enum ItemExtent {
    /// Every item has the same extent.
    Uniform(f64),
    /// Extent varies by index.
    Estimated(ExtentFn),
}

impl ItemExtent {
    /// Variable extent from an estimator closure.
    pub fn estimated(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        ItemExtent::Estimated(Arc::new(f))
    }

    /// Extent of `index`, sanitized to a positive finite number.
    pub fn extent_of(&self, index: usize) -> f64 {
        let raw = match self {
            ItemExtent::Uniform(extent) => *extent,
            ItemExtent::Estimated(f) => f(index),
        };
        sanitize_extent(raw)
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, ItemExtent::Uniform(_))
    }
}

impl fmt::Debug for ItemExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemExtent::Uniform(extent) => f.debug_tuple("Uniform").field(extent).finish(),
            ItemExtent::Estimated(_) => f.write_str("Estimated(..)"),
        }
    }
}

impl Default for ItemExtent {
    fn default() -> Self {
        ItemExtent::Uniform(crate::constants::ITEM_EXTENT)
    }
}

/// Non-finite or non-positive extents collapse to one pixel.
fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        1.0
    }
}

/// Start offsets of every item.
///
/// Uniform extents are answered arithmetically; estimated extents keep a
/// prefix array of length `count + 1` (the last entry is the total extent)
/// which grows incrementally when items are appended.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    extent: ItemExtent,
    count: usize,
    prefix: Vec<f64>,
}

impl Layout {
    pub(crate) fn new(extent: ItemExtent, count: usize) -> Self {
        let mut layout = Self {
            extent,
            count: 0,
            prefix: vec![0.0],
        };
        layout.resize(count);
        layout
    }

    pub(crate) fn extent(&self) -> &ItemExtent {
        &self.extent
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn set_extent(&mut self, extent: ItemExtent) {
        let count = self.count;
        self.extent = extent;
        self.count = 0;
        self.prefix.clear();
        self.prefix.push(0.0);
        self.resize(count);
    }

    pub(crate) fn resize(&mut self, count: usize) {
        if !self.extent.is_uniform() {
            if count < self.count {
                self.prefix.truncate(count + 1);
            } else {
                self.prefix.reserve(count - self.count);
                for index in self.count..count {
                    let next = self.prefix[index] + self.extent.extent_of(index);
                    self.prefix.push(next);
                }
            }
        }
        self.count = count;
    }

    pub(crate) fn start(&self, index: usize) -> f64 {
        match &self.extent {
            ItemExtent::Uniform(_) => index as f64 * self.extent.extent_of(index),
            ItemExtent::Estimated(_) => self.prefix[index.min(self.count)],
        }
    }

    pub(crate) fn size(&self, index: usize) -> f64 {
        self.extent.extent_of(index)
    }

    pub(crate) fn total(&self) -> f64 {
        self.start(self.count)
    }

    /// Index of the item containing `offset`, clamped to the last item.
    /// Callers guarantee `count > 0`.
    pub(crate) fn index_at(&self, offset: f64) -> usize {
        let last = self.count - 1;
        match &self.extent {
            ItemExtent::Uniform(_) => {
                let extent = self.extent.extent_of(0);
                ((offset / extent).floor().max(0.0) as usize).min(last)
            }
            ItemExtent::Estimated(_) => {
                let starts = &self.prefix[..self.count];
                starts
                    .partition_point(|&start| start <= offset)
                    .saturating_sub(1)
                    .min(last)
            }
        }
    }
}
