//! Property-based tests for the layout pipeline.
//!
//! Properties under test:
//! - positions form a contiguous prefix-sum layout (no gaps, no overlap)
//! - every position's height is the measured height or the default
//! - the computed window respects the render cap and tiles contiguously
//! - items strictly above or below the expanded viewport stay out of the
//!   window (unless the cap truncated it)
//! - eviction never touches measurements inside the margin
//!
//! Measurements are generated as arbitrary sparse maps so the Fenwick
//! accumulation is checked against a naive running sum.

use crate::engine::{compute_window, HeightCache, PositionIndex, VisibleRange, WindowParams};
use proptest::prelude::*;
use std::collections::HashMap;

const DEFAULT_HEIGHT: usize = 80;

/// Sparse measured heights over `0..count`.
fn arb_measurements(count: usize) -> impl Strategy<Value = HashMap<usize, usize>> {
    prop::collection::hash_map(0..count, 1usize..=400, 0..count.min(64))
}

fn cache_from(measurements: &HashMap<usize, usize>) -> HeightCache {
    let mut cache = HeightCache::new();
    for (&index, &height) in measurements {
        cache.record(index, height);
    }
    cache
}

fn built_index(count: usize, measurements: &HashMap<usize, usize>) -> PositionIndex {
    let mut index = PositionIndex::new();
    index.rebuild(count, DEFAULT_HEIGHT, &cache_from(measurements));
    index
}

fn expected_height(measurements: &HashMap<usize, usize>, index: usize) -> usize {
    measurements.get(&index).copied().unwrap_or(DEFAULT_HEIGHT)
}

fn params(max_rendered_items: usize) -> WindowParams {
    WindowParams {
        container_height: 600,
        default_item_height: DEFAULT_HEIGHT,
        buffer: 2,
        max_rendered_items,
    }
}

proptest! {
    /// Tops are the running sum of the preceding heights, with no gaps.
    #[test]
    fn positions_form_contiguous_prefix_sums(
        count in 1usize..500,
        measurements in arb_measurements(500),
    ) {
        let index = built_index(count, &measurements);

        let mut running_top = 0usize;
        for i in 0..count {
            let position = index.position(i).unwrap();
            prop_assert_eq!(position.index, i);
            prop_assert_eq!(position.top, running_top);
            prop_assert_eq!(position.height, expected_height(&measurements, i));
            running_top += position.height;
        }
        prop_assert_eq!(index.total(), running_top);
    }

    /// Rebuilding a reused index - across growth, shrinkage, and new
    /// measurements - matches a from-scratch build. Guards against stale
    /// Fenwick slots surviving a resize.
    #[test]
    fn reused_index_matches_fresh_build(
        first_count in 1usize..300,
        second_count in 1usize..300,
        first in arb_measurements(300),
        second in arb_measurements(300),
    ) {
        let mut cache = cache_from(&first);
        let mut reused = PositionIndex::new();
        reused.rebuild(first_count, DEFAULT_HEIGHT, &cache);
        for (&index, &height) in &second {
            cache.record(index, height);
        }
        reused.rebuild(second_count, DEFAULT_HEIGHT, &cache);

        let mut fresh = PositionIndex::new();
        fresh.rebuild(second_count, DEFAULT_HEIGHT, &cache);

        for i in 0..second_count {
            prop_assert_eq!(reused.position(i), fresh.position(i));
        }
        prop_assert_eq!(reused.total(), fresh.total());
    }

    /// The window never exceeds the cap and tiles the strip contiguously.
    #[test]
    fn window_is_capped_and_contiguous(
        count in 1usize..500,
        measurements in arb_measurements(500),
        scroll_offset in 0usize..100_000,
        max_rendered in 1usize..60,
    ) {
        let index = built_index(count, &measurements);
        let window = compute_window(&index, count, scroll_offset, &params(max_rendered));

        prop_assert!(window.range.len() <= max_rendered);
        prop_assert!(window.range.end <= count);
        prop_assert_eq!(window.positions.len(), window.range.len());

        for (offset, position) in window.positions.iter().enumerate() {
            prop_assert_eq!(position.index, window.range.start + offset);
        }
        for pair in window.positions.windows(2) {
            prop_assert_eq!(pair[1].top, pair[0].top + pair[0].height);
        }
    }

    /// Items outside the buffer-expanded viewport are excluded, and the
    /// window starts no later than the first item the viewport needs.
    #[test]
    fn window_brackets_expanded_viewport(
        count in 1usize..500,
        measurements in arb_measurements(500),
        scroll_offset in 0usize..50_000,
    ) {
        let p = params(1_000); // cap out of the way
        let index = built_index(count, &measurements);
        let window = compute_window(&index, count, scroll_offset, &p);

        let expand = p.buffer * p.default_item_height;
        let low = scroll_offset.saturating_sub(expand);
        let high = scroll_offset + p.container_height + expand;

        // Item before the window ends above the expanded top edge.
        if window.range.start > 0 {
            let before = index.position(window.range.start - 1).unwrap();
            prop_assert!(before.top + before.height < low);
        }
        // Item after the window starts below the expanded bottom edge.
        if window.range.end < count {
            let after = index.position(window.range.end).unwrap();
            prop_assert!(after.top > high);
        }
    }

    /// Eviction keeps exactly the measurements within the margin.
    #[test]
    fn eviction_respects_margin(
        measurements in arb_measurements(1_000),
        start in 0usize..900,
        span in 1usize..100,
        margin in 0usize..100,
    ) {
        let mut cache = cache_from(&measurements);
        let range = VisibleRange::new(start, start + span);

        cache.evict_outside(range, margin);

        let keep_from = start.saturating_sub(margin);
        let keep_to = (start + span) + margin;
        for (&index, &height) in &measurements {
            if (keep_from..=keep_to).contains(&index) {
                prop_assert_eq!(cache.get(index), Some(height));
            } else {
                prop_assert_eq!(cache.get(index), None);
            }
        }
    }

    /// Scrolling past the end still yields a non-empty window for
    /// non-empty collections.
    #[test]
    fn overscroll_falls_back_to_a_window(
        count in 1usize..200,
        measurements in arb_measurements(200),
    ) {
        let index = built_index(count, &measurements);
        let far = index.total() + 10_000;
        let window = compute_window(&index, count, far, &params(30));

        prop_assert!(!window.range.is_empty());
    }
}
