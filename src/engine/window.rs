//! Window calculation - which items to render for a scroll offset.
//!
//! Pure functions over the position index: no hidden state, deterministic
//! for identical inputs. The feed facade owns the mutable pieces (last
//! range, eviction) and calls in here on every scroll event.

use crate::engine::position_index::PositionIndex;
use crate::engine::visible_range::VisibleRange;
use crate::model::ItemPosition;

/// Tunables for window computation, taken from [`crate::config::Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Viewport height in pixels.
    pub container_height: usize,
    /// Estimated height for unmeasured items, in pixels.
    pub default_item_height: usize,
    /// Render buffer beyond the viewport, in default-height units.
    pub buffer: usize,
    /// Hard cap on rendered items per window.
    pub max_rendered_items: usize,
}

/// Result of a window computation: the clamped range and the layout of
/// every item inside it, in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Half-open index range of rendered items.
    pub range: VisibleRange,
    /// Position of each item in `range`, ascending.
    pub positions: Vec<ItemPosition>,
}

/// Computes the window to render at `scroll_offset`.
///
/// The viewport `[scroll_offset, scroll_offset + container_height]` is
/// expanded by `buffer * default_item_height` pixels on each side; the
/// window is every position overlapping the expanded viewport, clamped to
/// at most `max_rendered_items` (the cap takes precedence over buffer
/// expansion - it bounds render and measurement cost on fast scrolls and
/// tall synthetic buffers).
///
/// Two degenerate inputs are handled specially:
/// - empty position index (cold start, before the first rebuild): the first
///   `min(ceil(container / default) + 2 * buffer, max_rendered_items)`
///   items, laid out at multiples of the default height;
/// - expanded lower bound beyond the last position (scroll past the end):
///   the range falls back to starting at 0.
pub fn compute_window(
    index: &PositionIndex,
    item_count: usize,
    scroll_offset: usize,
    params: &WindowParams,
) -> Window {
    if index.is_empty() {
        return cold_start_window(item_count, params);
    }

    let expand = params.buffer * params.default_item_height;
    let low = scroll_offset.saturating_sub(expand);
    let high = scroll_offset + params.container_height + expand;

    let start = index.first_reaching(low).unwrap_or(0);
    let end = index
        .lower_bound(high)
        .map(|last| last + 1)
        .unwrap_or_else(|| index.len());

    let end = if end - start > params.max_rendered_items {
        start + params.max_rendered_items
    } else {
        end
    };

    let range = VisibleRange::new(start, end);
    let positions = (start..end)
        .map(|i| index.position(i).expect("range is within index bounds"))
        .collect();
    Window { range, positions }
}

/// Synthetic window used before the first rebuild: positions are estimated
/// at multiples of the default height.
fn cold_start_window(item_count: usize, params: &WindowParams) -> Window {
    let by_viewport =
        params.container_height.div_ceil(params.default_item_height) + params.buffer * 2;
    let count = by_viewport.min(params.max_rendered_items).min(item_count);

    let positions = (0..count)
        .map(|index| ItemPosition {
            index,
            top: index * params.default_item_height,
            height: params.default_item_height,
        })
        .collect();
    Window {
        range: VisibleRange::new(0, count),
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::height_cache::HeightCache;

    fn params() -> WindowParams {
        WindowParams {
            container_height: 600,
            default_item_height: 80,
            buffer: 2,
            max_rendered_items: 30,
        }
    }

    fn uniform_index(count: usize) -> PositionIndex {
        let mut index = PositionIndex::new();
        index.rebuild(count, 80, &HeightCache::new());
        index
    }

    #[test]
    fn window_at_top_starts_at_zero() {
        let index = uniform_index(1000);
        let window = compute_window(&index, 1000, 0, &params());

        assert_eq!(window.range.start, 0);
        // Viewport [0, 600] expanded to [0, 760]: items 0..=9 overlap
        // ([720, 800) touches 760), so the exclusive end is 10.
        assert_eq!(window.range.end, 10);
        assert_eq!(window.positions[0].top, 0);
    }

    #[test]
    fn window_follows_scroll_offset() {
        let index = uniform_index(1000);
        let window = compute_window(&index, 1000, 8000, &params());

        // Expanded viewport [7840, 8760]: first item reaching 7840 is 97
        // (bottom 7840), first item with top > 8760 is 110.
        assert_eq!(window.range.start, 97);
        assert_eq!(window.range.end, 110);
        for pair in window.positions.windows(2) {
            assert_eq!(pair[1].top, pair[0].top + pair[0].height);
        }
    }

    #[test]
    fn window_never_exceeds_max_rendered_items() {
        let index = uniform_index(1000);
        let wide = WindowParams {
            buffer: 100,
            ..params()
        };
        let window = compute_window(&index, 1000, 8000, &wide);

        assert_eq!(window.range.len(), wide.max_rendered_items);
        assert_eq!(window.positions.len(), wide.max_rendered_items);
    }

    #[test]
    fn scroll_past_end_falls_back_to_start_zero() {
        let index = uniform_index(10);
        let window = compute_window(&index, 10, 100_000, &params());

        assert_eq!(window.range.start, 0);
        assert_eq!(window.range.end, 10);
    }

    #[test]
    fn cold_start_renders_estimated_leading_slice() {
        let index = PositionIndex::new();
        let window = compute_window(&index, 1000, 0, &params());

        // ceil(600 / 80) + 2 * 2 = 12, under the cap of 30.
        assert_eq!(window.range, VisibleRange::new(0, 12));
        assert_eq!(window.positions[3].top, 240);
        assert_eq!(window.positions[3].height, 80);
    }

    #[test]
    fn cold_start_is_capped_by_max_rendered_items() {
        let index = PositionIndex::new();
        let small_cap = WindowParams {
            max_rendered_items: 5,
            ..params()
        };
        let window = compute_window(&index, 1000, 0, &small_cap);
        assert_eq!(window.range.len(), 5);
    }

    #[test]
    fn cold_start_is_capped_by_item_count() {
        let index = PositionIndex::new();
        let window = compute_window(&index, 3, 0, &params());
        assert_eq!(window.range, VisibleRange::new(0, 3));
    }

    #[test]
    fn measured_heights_shift_the_window() {
        let mut cache = HeightCache::new();
        // One tall item at the top pushes everything else down.
        cache.record(0, 4000);
        let mut index = PositionIndex::new();
        index.rebuild(100, 80, &cache);

        let window = compute_window(&index, 100, 0, &params());
        assert_eq!(window.range.start, 0);
        // Item 0 alone covers the expanded viewport [0, 760].
        assert_eq!(window.range.end, 1);

        let window = compute_window(&index, 100, 4200, &params());
        // Expanded viewport [4040, 4960]: item 0 ends at 4000, so the
        // window starts at item 1 (top 4000, bottom 4080 >= 4040).
        assert_eq!(window.range.start, 1);
        assert!(window.positions[0].top == 4000);
    }

    #[test]
    fn identical_inputs_produce_identical_windows() {
        let index = uniform_index(500);
        let first = compute_window(&index, 500, 12_345, &params());
        let second = compute_window(&index, 500, 12_345, &params());
        assert_eq!(first, second);
    }
}
