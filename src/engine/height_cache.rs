//! HeightCache - measured pixel heights, bounded by eviction.
//!
//! Items start out with an estimated default height; once the renderer
//! measures a real one, it lands here and overrides the default on the next
//! position-index rebuild. The cache is the only per-item layout state that
//! grows with scrolling, so it is bounded: entries far outside the visible
//! window are evicted, trading re-measurement on scroll-back for
//! unbounded-growth prevention. Never persisted.

use std::collections::HashMap;

use crate::engine::visible_range::VisibleRange;

/// Measured-height overrides keyed by item index.
#[derive(Debug, Clone, Default)]
pub struct HeightCache {
    heights: HashMap<usize, usize>,
}

impl HeightCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement for `index`.
    ///
    /// Returns `true` when the stored value changed (first measurement, or a
    /// re-measurement that differs) - the caller must rebuild the position
    /// index in that case. Identical re-measurements are ignored.
    pub fn record(&mut self, index: usize, height: usize) -> bool {
        if self.heights.get(&index) == Some(&height) {
            return false;
        }
        self.heights.insert(index, height);
        true
    }

    /// Returns the measured height for `index`, if any.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.heights.get(&index).copied()
    }

    /// Number of cached measurements.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns true when no measurements are cached.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Drops all measurements.
    pub fn clear(&mut self) {
        self.heights.clear();
    }

    /// Evicts every entry more than `margin` indices outside `range`.
    ///
    /// Keeps the window `[start - margin, end + margin]` and deletes the
    /// rest, bounding the cache to O(visible window + margin) regardless of
    /// total item count. Returns the number of entries removed.
    pub fn evict_outside(&mut self, range: VisibleRange, margin: usize) -> usize {
        let low = range.start.saturating_sub(margin);
        let high = range.end.saturating_add(margin);
        let before = self.heights.len();
        self.heights.retain(|&index, _| index >= low && index <= high);
        let evicted = before - self.heights.len();
        if evicted > 0 {
            tracing::debug!(
                evicted,
                start = range.start,
                end = range.end,
                margin,
                "evicted stale height measurements"
            );
        }
        evicted
    }
}
