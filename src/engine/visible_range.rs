//! Visible range calculation result.

/// Half-open range of item indices currently rendered.
///
/// Produced by the window calculator; the previous range is kept only to
/// decide when an eviction pass is warranted (a big jump), it is not
/// authoritative layout state.
///
/// # Invariants
/// - `start <= end`
/// - `end <= item count` at computation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of first rendered item (inclusive).
    pub start: usize,
    /// Index one past the last rendered item (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Create a new range.
    ///
    /// # Panics
    /// In debug builds, panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} > end {end}");
        Self { start, end }
    }

    /// Number of rendered items.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an item index falls inside the range.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Whether this range jumped more than `threshold` indices away from
    /// `previous` in either bound.
    ///
    /// The eviction heuristic: rather than scanning the height cache on
    /// every scroll tick, an eviction pass runs only when the window moved
    /// by more than a window's worth of items.
    pub fn big_jump_from(&self, previous: VisibleRange, threshold: usize) -> bool {
        self.start.abs_diff(previous.start) > threshold || self.end.abs_diff(previous.end) > threshold
    }
}
