//! Infinite-scroll trigger.
//!
//! Watches the distance to the bottom of the scrollable extent and loads
//! the next batch when the viewport gets close, under a single-flight
//! guard: while a load is in flight, further triggers are dropped, not
//! queued.

use crate::control::single_flight::{FlightPermit, SingleFlight};
use crate::loader::PagedLoader;
use crate::store::ItemStore;

/// Scroll geometry at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Current scroll offset in pixels.
    pub scroll_top: usize,
    /// Total scrollable extent in pixels.
    pub scroll_height: usize,
    /// Viewport height in pixels.
    pub container_height: usize,
}

impl ScrollMetrics {
    /// Pixels left before the viewport bottom reaches the end of the feed.
    pub fn distance_to_bottom(&self) -> usize {
        self.scroll_height
            .saturating_sub(self.scroll_top + self.container_height)
    }
}

/// Threshold-based load-more dispatcher.
#[derive(Debug)]
pub struct InfiniteScrollTrigger {
    threshold: usize,
    flight: SingleFlight,
}

impl InfiniteScrollTrigger {
    /// Creates a trigger that fires within `threshold` pixels of the
    /// bottom.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            flight: SingleFlight::new(),
        }
    }

    /// Whether a triggered load is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.flight.is_busy()
    }

    /// Reserve the in-flight slot without loading.
    ///
    /// For hosts that run the load themselves (e.g. on another event
    /// tick); [`Self::on_scroll`] drops its trigger while the permit is
    /// held.
    pub fn try_acquire(&self) -> Option<FlightPermit<'_>> {
        self.flight.try_acquire()
    }

    /// Handle a scroll notification.
    ///
    /// Fires `load_more` when the distance to the bottom crosses the
    /// threshold, more items exist, and no load is in flight. Returns
    /// `true` when a batch was appended. The in-flight guard is released
    /// on every exit path.
    pub fn on_scroll(
        &self,
        metrics: ScrollMetrics,
        loader: &mut PagedLoader,
        store: &mut dyn ItemStore,
    ) -> bool {
        if metrics.distance_to_bottom() >= self.threshold || !loader.has_more() {
            return false;
        }
        let Some(_permit) = self.flight.try_acquire() else {
            tracing::debug!("load already in flight, dropping trigger");
            return false;
        };
        loader.load_more(store)
    }
}
