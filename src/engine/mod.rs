//! Windowing and position-cache engine.
//!
//! The layout core: cumulative offsets over variable item heights, visible
//! window computation, and bounded height-measurement caching.
//!
//! # Module Structure
//!
//! - `height_cache`: HeightCache - measured-height overrides + eviction
//! - `position_index`: PositionIndex - Fenwick-backed prefix sums
//! - `visible_range`: VisibleRange - computed window range
//! - `window`: pure window computation over the position index

pub mod height_cache;
pub mod position_index;
pub mod visible_range;
pub mod window;

pub use height_cache::HeightCache;
pub use position_index::PositionIndex;
pub use visible_range::VisibleRange;
pub use window::{compute_window, Window, WindowParams};
