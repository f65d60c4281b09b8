//! PositionIndex - cumulative pixel offsets over item heights.
//!
//! Maintains the prefix-sum table that maps an item index to its top offset
//! and height. Backed by a Fenwick tree so offset queries and offset → index
//! searches stay cheap even at millions of items.
//!
//! The index is rebuilt eagerly: whenever the item count grows or a measured
//! height changes, [`PositionIndex::rebuild`] repopulates the tree from the
//! height cache, falling back to the configured default height for items
//! that have never been measured. After a rebuild, `len()` always equals the
//! item count, and for every valid `i`:
//!
//! `position(i + 1).top == position(i).top + position(i).height`
//!
//! # Complexity
//!
//! - `rebuild`: O(n log n)
//! - `position`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `total`: O(log n)

use crate::engine::height_cache::HeightCache;
use crate::model::ItemPosition;

/// Prefix-sum index from item index to pixel offset and height.
///
/// # Examples
///
/// ```
/// use vfeed::engine::{HeightCache, PositionIndex};
///
/// let mut cache = HeightCache::new();
/// cache.record(1, 120);
///
/// let mut index = PositionIndex::new();
/// index.rebuild(3, 80, &cache);
///
/// let pos = index.position(2).unwrap();
/// assert_eq!(pos.top, 200); // 80 + 120
/// assert_eq!(pos.height, 80);
/// assert_eq!(index.total(), 280);
/// ```
#[derive(Debug, Clone)]
pub struct PositionIndex {
    /// Fenwick tree backing storage (0-indexed API over the `fenwick` crate).
    tree: Vec<isize>,
    /// Number of valid entries (len <= tree.len()).
    len: usize,
}

impl PositionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            tree: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty index with pre-allocated backing storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            len: 0,
        }
    }

    /// Rebuilds the index for `item_count` items.
    ///
    /// Left-to-right prefix sum: each item uses its measured height from
    /// `heights`, or `default_height` if it has never been measured. Runs on
    /// every item-count growth and on every height change; readers never
    /// observe a partially rebuilt index.
    pub fn rebuild(&mut self, item_count: usize, default_height: usize, heights: &HeightCache) {
        self.clear();
        if self.tree.len() < item_count {
            self.tree.resize(item_count.next_power_of_two(), 0);
        }
        for index in 0..item_count {
            let height = heights.get(index).unwrap_or(default_height);
            fenwick::array::update(&mut self.tree, index, height as isize);
        }
        self.len = item_count;
        tracing::debug!(item_count, "position index rebuilt");
    }

    /// Returns the number of positioned items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index holds no positions (cold start).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the position of the item at `index`, or `None` when out of
    /// range.
    pub fn position(&self, index: usize) -> Option<ItemPosition> {
        if index >= self.len {
            return None;
        }
        let bottom = self.prefix_sum(index);
        let top = if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        };
        Some(ItemPosition {
            index,
            top,
            height: bottom - top,
        })
    }

    /// Total pixel height of all positioned items.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len - 1)
        }
    }

    /// Total pixel height with the cold-start fallback.
    ///
    /// Before the first rebuild the index is empty and the extent is exactly
    /// `item_count * default_height`; afterwards it is the last position's
    /// `top + height`.
    pub fn total_height(&self, item_count: usize, default_height: usize) -> usize {
        if self.is_empty() {
            item_count * default_height
        } else {
            self.total()
        }
    }

    /// Cumulative height up to and including `index`.
    ///
    /// Equals `position(index).top + position(index).height`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len,
            "index {} out of bounds (len: {})",
            index,
            self.len
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Binary search for the first index whose bottom edge exceeds `offset`.
    ///
    /// Entry `i` covers the pixel range `[top(i), top(i) + height(i))`;
    /// this returns the entry containing `offset`, or `None` when `offset`
    /// lies at or beyond the total height.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfeed::engine::{HeightCache, PositionIndex};
    ///
    /// let mut cache = HeightCache::new();
    /// cache.record(0, 10); // [0..10)
    /// cache.record(1, 20); // [10..30)
    ///
    /// let mut index = PositionIndex::new();
    /// index.rebuild(2, 80, &cache);
    ///
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(9), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), None);
    /// ```
    pub fn lower_bound(&self, offset: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        // First index where prefix_sum(index) > offset.
        let mut left = 0;
        let mut right = self.len;
        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > offset {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        if left >= self.len {
            None
        } else {
            Some(left)
        }
    }

    /// First index whose bottom edge reaches `offset` (`top + height >=
    /// offset`), or `None` when no entry reaches that far.
    ///
    /// This is the window calculator's start-edge search: with `offset` at
    /// the buffer-expanded top edge of the viewport, the returned entry is
    /// the first one still (partially) inside it.
    pub fn first_reaching(&self, offset: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        if offset == 0 {
            return Some(0);
        }
        self.lower_bound(offset - 1)
    }

    /// Clears all entries, retaining allocated capacity.
    ///
    /// Zeroes the whole backing tree: Fenwick parent slots above `len` carry
    /// partial sums and must not survive into the next rebuild.
    pub fn clear(&mut self) {
        for slot in self.tree.iter_mut() {
            *slot = 0;
        }
        self.len = 0;
    }
}

impl Default for PositionIndex {
    fn default() -> Self {
        Self::new()
    }
}
