//! Settle timer for scroll-jump animations.
//!
//! A smooth scroll needs a quiet period while the animation lands: the
//! engine holds a "jumping" flag and suppresses scroll-driven side effects
//! (infinite-scroll triggering) until the window elapses. Expressed as an
//! explicit deadline queried with an injected `now` - a new jump supersedes
//! the previous deadline instead of racing a stale callback, and tests
//! control time directly.

use std::time::{Duration, Instant};

/// Default settle window after issuing a smooth scroll.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

/// Cancellable, superseding deadline.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    duration: Duration,
    deadline: Option<Instant>,
}

impl SettleTimer {
    /// Creates an inactive timer with the given settle window.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer. A pending deadline is replaced, never
    /// stacked.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.duration);
    }

    /// Whether the settle window is still open at `now`.
    ///
    /// The flag clears once the window elapses regardless of whether the
    /// animation is still visually settling.
    pub fn is_active(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for SettleTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE)
    }
}
