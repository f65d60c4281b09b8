//! Core data model: items, positions, and render-ready virtual items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single record in the feed.
///
/// Identity is `id`, which equals the item's position in full generation
/// order. Items are immutable once created; re-generation for the same id
/// yields an identical item (generation is keyed by index).
///
/// Timestamps serialize with millisecond precision, matching the persistent
/// store's encoding: a round trip through the store preserves
/// `(id, text, timestamp)` equality at that precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity; equals the generation index.
    pub id: u64,
    /// Message body.
    pub text: String,
    /// Creation timestamp (millisecond precision across persistence).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Position of an item within the laid-out feed.
///
/// Produced by the position index; `top` is the sum of all prior entries'
/// heights, so for consecutive entries
/// `position[i + 1].top == position[i].top + position[i].height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPosition {
    /// Index into the item collection.
    pub index: usize,
    /// Pixel offset of the item's top edge from the start of the feed.
    pub top: usize,
    /// Pixel height (measured, or the configured default).
    pub height: usize,
}

/// An item paired with its current layout, ready to hand to a renderer.
///
/// Derived on every window computation; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualItem {
    /// The underlying record.
    pub item: Item,
    /// Pixel offset of the top edge.
    pub top: usize,
    /// Pixel height.
    pub height: usize,
}

impl VirtualItem {
    /// Combine an item with its layout position.
    pub fn new(item: Item, position: ItemPosition) -> Self {
        Self {
            item,
            top: position.top,
            height: position.height,
        }
    }
}
