//! VirtualFeed - event-driven integration of the engine.
//!
//! One state-owning type wires the pieces together the way a renderer
//! drives them: scroll notifications in, visible slices and scroll
//! commands out. All mutation happens here, on the caller's single control
//! thread, in response to discrete events; there is no hidden
//! recomputation graph - the position index is rebuilt explicitly when a
//! measurement or the item count changes, and every query is a plain
//! function of current state.
//!
//! Event flow: scroll → window computation (position index + height
//! cache) → visible slice → measurement callbacks → height cache update →
//! index rebuild → eviction on big jumps. Near-bottom scrolls trigger the
//! paged loader under a single-flight guard; navigation requests
//! materialize their target, force a rebuild, then issue a scroll jump.

use std::time::Instant;

use crate::config::Settings;
use crate::control::{
    InfiniteScrollTrigger, NavigationController, NavigationError, QuickJump, ScrollCommand,
    ScrollJumpController, ScrollMetrics, SettleTimer,
};
use crate::engine::{compute_window, HeightCache, PositionIndex, VisibleRange, WindowParams};
use crate::loader::{PagedLoader, RestoreOutcome};
use crate::model::VirtualItem;
use crate::store::ItemStore;

/// Counters mirrored to debug overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Items in the last computed window.
    pub rendered_items: usize,
    /// Height measurements currently cached.
    pub cached_heights: usize,
    /// Entries in the position index.
    pub total_positions: usize,
}

/// The assembled windowing engine.
///
/// Owns the settings snapshot, the item loader, the layout caches, and the
/// scroll controllers; generic over the persistent store so tests run
/// against [`crate::store::MemoryStore`] and applications against
/// [`crate::store::JsonFileStore`].
#[derive(Debug)]
pub struct VirtualFeed<S: ItemStore> {
    settings: Settings,
    store: S,
    loader: PagedLoader,
    heights: HeightCache,
    positions: PositionIndex,
    last_range: VisibleRange,
    trigger: InfiniteScrollTrigger,
    jump: ScrollJumpController,
    nav: NavigationController,
    scroll_top: usize,
}

impl<S: ItemStore> VirtualFeed<S> {
    /// Create a feed over `store`. No items are loaded until
    /// [`Self::restore_or_initialize`].
    pub fn new(settings: Settings, store: S) -> Self {
        Self {
            settings,
            store,
            loader: PagedLoader::new(&settings),
            heights: HeightCache::new(),
            positions: PositionIndex::new(),
            last_range: VisibleRange::default(),
            trigger: InfiniteScrollTrigger::new(settings.infinite_scroll_threshold),
            jump: ScrollJumpController::new(SettleTimer::default()),
            nav: NavigationController::new(),
            scroll_top: 0,
        }
    }

    /// Load the previous session's items from the store, or generate a
    /// fresh collection, then build the initial layout.
    pub fn restore_or_initialize(&mut self) -> RestoreOutcome {
        let outcome = self.loader.restore_or_initialize(&mut self.store);
        self.reset_layout();
        outcome
    }

    /// Clear the store, regenerate the initial collection, and rebuild.
    pub fn reset_and_regenerate(&mut self) {
        self.loader.reset_and_regenerate(&mut self.store);
        self.reset_layout();
    }

    /// Handle a scroll notification at the current instant.
    ///
    /// See [`Self::on_scroll_at`].
    pub fn on_scroll(&mut self, scroll_top: usize) -> Vec<VirtualItem> {
        self.on_scroll_at(scroll_top, Instant::now())
    }

    /// Handle a scroll notification.
    ///
    /// Computes the visible window for `scroll_top`, runs the eviction
    /// heuristic, and - unless a jump animation is settling - feeds the
    /// infinite-scroll trigger. A batch appended by the trigger is visible
    /// to the next window computation (and persisted best-effort).
    pub fn on_scroll_at(&mut self, scroll_top: usize, now: Instant) -> Vec<VirtualItem> {
        self.scroll_top = scroll_top;

        let params = self.window_params();
        let window = compute_window(&self.positions, self.loader.len(), scroll_top, &params);

        if window
            .range
            .big_jump_from(self.last_range, self.settings.max_rendered_items)
        {
            self.heights
                .evict_outside(window.range, self.settings.max_rendered_items);
        }
        self.last_range = window.range;

        if !self.jump.is_jumping(now) {
            let metrics = ScrollMetrics {
                scroll_top,
                scroll_height: self.total_height(),
                container_height: self.settings.container_height,
            };
            if self
                .trigger
                .on_scroll(metrics, &mut self.loader, &mut self.store)
            {
                self.rebuild_index();
            }
        }

        window
            .positions
            .iter()
            .filter_map(|pos| {
                self.loader
                    .item(pos.index)
                    .cloned()
                    .map(|item| VirtualItem::new(item, *pos))
            })
            .collect()
    }

    /// Record a measured item height from the renderer.
    ///
    /// A changed measurement invalidates every cached offset from `index`
    /// onward; the index is rebuilt immediately so the very next window
    /// computation sees it.
    pub fn on_measured(&mut self, index: usize, height: usize) {
        if self.heights.record(index, height) {
            self.rebuild_index();
        }
    }

    /// Jump to the item with the given id.
    ///
    /// Validates the target against `[0, total_items)`, materializes it
    /// through the loader, rebuilds the index, and - if the target has a
    /// position - issues a scroll command and closes the jump panel.
    /// Returns `Ok(None)` when a navigation is already in progress (the
    /// request is dropped) or the target could not be positioned.
    pub fn jump_to_id(
        &mut self,
        target_id: i64,
        now: Instant,
    ) -> Result<Option<ScrollCommand>, NavigationError> {
        let target = self
            .nav
            .validate_target(target_id, self.settings.total_items)?;

        let command = {
            let Some(_permit) = self.nav.try_begin() else {
                tracing::debug!(target, "navigation already in progress, dropping jump");
                return Ok(None);
            };
            self.loader.load_up_to_index(&mut self.store, target);
            self.positions.rebuild(
                self.loader.len(),
                self.settings.default_item_height,
                &self.heights,
            );
            self.jump.jump_to_index(target, &self.positions, now)
        };

        if command.is_some() {
            self.nav.close_panel();
        }
        Ok(command)
    }

    /// Jump to the start, middle, or end of the dataset.
    ///
    /// Same load → rebuild → scroll sequence as [`Self::jump_to_id`], but
    /// the panel stays open. Returns `None` when dropped (navigation in
    /// progress) or the target could not be positioned.
    pub fn quick_jump(&mut self, position: QuickJump, now: Instant) -> Option<ScrollCommand> {
        let target = position.target_index(self.settings.total_items);

        let Some(_permit) = self.nav.try_begin() else {
            tracing::debug!(?position, "navigation already in progress, dropping quick jump");
            return None;
        };
        self.loader.load_up_to_index(&mut self.store, target);
        self.positions.rebuild(
            self.loader.len(),
            self.settings.default_item_height,
            &self.heights,
        );
        self.jump.jump_to_index(target, &self.positions, now)
    }

    /// Jump to a proportional position (scrollbar drags).
    pub fn jump_to_ratio(&mut self, ratio: f64, now: Instant) -> ScrollCommand {
        let total = self.total_height();
        self.jump.jump_to_ratio(ratio, total, now)
    }

    /// Last scroll offset handed to [`Self::on_scroll_at`].
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Total scrollable extent in pixels.
    ///
    /// Before the first rebuild this is exactly
    /// `item_count * default_item_height`.
    pub fn total_height(&self) -> usize {
        self.positions
            .total_height(self.loader.len(), self.settings.default_item_height)
    }

    /// Whether a jump animation is still settling at `now`.
    pub fn is_jumping(&self, now: Instant) -> bool {
        self.jump.is_jumping(now)
    }

    /// Counters for debug overlays.
    pub fn render_stats(&self) -> RenderStats {
        RenderStats {
            rendered_items: self.last_range.len(),
            cached_heights: self.heights.len(),
            total_positions: self.positions.len(),
        }
    }

    /// The loaded items, in index order.
    pub fn items(&self) -> &[crate::model::Item] {
        self.loader.items()
    }

    /// The active settings snapshot.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Position of the item at `index`, if the index has been built that
    /// far.
    pub fn item_position(&self, index: usize) -> Option<crate::model::ItemPosition> {
        self.positions.position(index)
    }

    /// Whether more batches can still be loaded.
    pub fn has_more(&self) -> bool {
        self.loader.has_more()
    }

    /// Whether the jump panel is open.
    pub fn navigation_open(&self) -> bool {
        self.nav.panel_open()
    }

    /// Toggle the jump panel.
    pub fn toggle_navigation(&mut self) {
        self.nav.toggle_panel();
    }

    /// Close the jump panel.
    pub fn close_navigation(&mut self) {
        self.nav.close_panel();
    }

    /// Drop all measurements and the remembered range, then rebuild.
    ///
    /// Runs on wholesale collection replacement (restore, reset): stale
    /// measurements keyed by index would otherwise attach to different
    /// items.
    fn reset_layout(&mut self) {
        self.heights.clear();
        self.last_range = VisibleRange::default();
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.positions.rebuild(
            self.loader.len(),
            self.settings.default_item_height,
            &self.heights,
        );
    }

    fn window_params(&self) -> WindowParams {
        WindowParams {
            container_height: self.settings.container_height,
            default_item_height: self.settings.default_item_height,
            buffer: self.settings.buffer,
            max_rendered_items: self.settings.max_rendered_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn feed(total: usize, per_page: usize, initial: usize) -> VirtualFeed<MemoryStore> {
        let settings = Settings {
            total_items: total,
            items_per_page: per_page,
            initial_items: initial,
            ..Settings::default()
        };
        let mut feed = VirtualFeed::new(settings, MemoryStore::new());
        feed.restore_or_initialize();
        feed
    }

    #[test]
    fn initial_scroll_returns_leading_window() {
        let mut feed = feed(1_000, 50, 100);
        let items = feed.on_scroll(0);

        assert!(!items.is_empty());
        assert_eq!(items[0].item.id, 0);
        assert_eq!(items[0].top, 0);
    }

    #[test]
    fn total_height_matches_default_extent_after_rebuild() {
        let feed = feed(1_000, 50, 100);
        assert_eq!(feed.total_height(), 100 * 80);
    }

    #[test]
    fn measurement_changes_layout_for_next_window() {
        let mut feed = feed(1_000, 50, 100);
        feed.on_scroll(0);

        feed.on_measured(0, 200);

        let items = feed.on_scroll(0);
        assert_eq!(items[0].height, 200);
        assert_eq!(items[1].top, 200);
        assert_eq!(feed.total_height(), 200 + 99 * 80);
    }

    #[test]
    fn identical_remeasurement_does_not_change_stats() {
        let mut feed = feed(1_000, 50, 100);
        feed.on_measured(3, 80);
        let before = feed.render_stats();
        feed.on_measured(3, 80);
        assert_eq!(feed.render_stats(), before);
    }

    #[test]
    fn near_bottom_scroll_loads_next_batch() {
        let mut feed = feed(1_000, 50, 10);

        // 10 items x 80px = 800px extent; any offset is near the bottom.
        feed.on_scroll(0);

        assert_eq!(feed.items().len(), 60);
        // The appended batch is positioned for the next computation.
        assert_eq!(feed.render_stats().total_positions, 60);
    }

    #[test]
    fn scroll_far_from_bottom_does_not_load() {
        let mut feed = feed(1_000, 50, 100);

        feed.on_scroll(0); // 8000px extent, 600px viewport: far from bottom

        assert_eq!(feed.items().len(), 100);
    }

    #[test]
    fn jumping_suppresses_infinite_scroll() {
        let mut feed = feed(1_000, 50, 10);
        let now = Instant::now();

        feed.jump_to_ratio(1.0, now);
        feed.on_scroll_at(700, now);

        assert_eq!(feed.items().len(), 10, "no load while jump settles");

        // After the settle window the same scroll loads.
        feed.on_scroll_at(700, now + crate::control::DEFAULT_SETTLE);
        assert_eq!(feed.items().len(), 60);
    }

    #[test]
    fn jump_to_id_materializes_and_targets_position() {
        let mut feed = feed(1_000, 50, 10);
        let now = Instant::now();

        let command = feed.jump_to_id(237, now).unwrap().unwrap();

        assert!(feed.items().len() > 237);
        let position = feed.item_position(237).unwrap();
        assert_eq!(command.target_px, position.top);
        assert!(command.animated);
        assert!(feed.is_jumping(now));
    }

    #[test]
    fn jump_to_id_rejects_out_of_range_without_loading() {
        let mut feed = feed(1_000, 50, 10);
        let now = Instant::now();

        assert!(matches!(
            feed.jump_to_id(-1, now),
            Err(NavigationError::OutOfRange { max: 999, .. })
        ));
        assert!(matches!(
            feed.jump_to_id(1_000, now),
            Err(NavigationError::OutOfRange { .. })
        ));
        assert_eq!(feed.items().len(), 10, "no load on rejected target");
    }

    #[test]
    fn jump_to_id_closes_panel_on_success() {
        let mut feed = feed(1_000, 50, 10);
        feed.toggle_navigation();
        assert!(feed.navigation_open());

        feed.jump_to_id(5, Instant::now()).unwrap().unwrap();
        assert!(!feed.navigation_open());
    }

    #[test]
    fn quick_jump_end_loads_everything() {
        let mut feed = feed(1_000, 50, 50);
        feed.toggle_navigation();

        let command = feed.quick_jump(QuickJump::End, Instant::now()).unwrap();

        assert_eq!(feed.items().len(), 1_000);
        assert_eq!(command.target_px, feed.item_position(999).unwrap().top);
        assert!(feed.navigation_open(), "quick jump keeps the panel open");
    }

    #[test]
    fn quick_jump_middle_targets_half_of_dataset() {
        let mut feed = feed(1_000, 50, 10);
        feed.quick_jump(QuickJump::Middle, Instant::now()).unwrap();
        assert!(feed.item_position(500).is_some());
    }

    #[test]
    fn big_jump_evicts_distant_measurements() {
        let mut feed = feed(10_000, 50, 10_000);
        feed.on_scroll(0);
        for index in 0..10 {
            feed.on_measured(index, 100);
        }
        assert_eq!(feed.render_stats().cached_heights, 10);

        // Jump far beyond max_rendered_items (30) in index distance.
        feed.on_scroll(500_000);

        assert_eq!(feed.render_stats().cached_heights, 0);
    }

    #[test]
    fn reset_regenerates_and_clears_measurements() {
        let mut feed = feed(1_000, 50, 100);
        feed.on_measured(0, 300);
        feed.on_scroll(0);

        feed.reset_and_regenerate();

        assert_eq!(feed.items().len(), 100);
        assert_eq!(feed.render_stats().cached_heights, 0);
        assert_eq!(feed.total_height(), 100 * 80);
    }

    #[test]
    fn restore_round_trips_items_across_feeds() {
        let settings = Settings {
            total_items: 1_000,
            items_per_page: 50,
            initial_items: 100,
            ..Settings::default()
        };
        let mut first = VirtualFeed::new(settings, MemoryStore::new());
        first.restore_or_initialize();
        let saved: Vec<_> = first.items().to_vec();

        // Hand the same store to a fresh feed.
        let VirtualFeed { store, .. } = first;
        let mut second = VirtualFeed::new(settings, store);
        let outcome = second.restore_or_initialize();

        assert_eq!(outcome, RestoreOutcome::Restored(100));
        assert_eq!(second.items(), saved.as_slice());
    }
}
