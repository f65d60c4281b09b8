//! Scroll-jump control.
//!
//! Computes jump targets (from a ratio or from the position index) and
//! emits scroll commands for the renderer to execute; the engine never
//! touches pixels itself. Each issued jump arms the settle timer so
//! scroll-driven side effects stay quiet while the animation lands.

use std::time::Instant;

use crate::control::settle::SettleTimer;
use crate::engine::PositionIndex;

/// A scroll the renderer should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    /// Absolute target offset in pixels.
    pub target_px: usize,
    /// Whether to animate (smooth scroll) rather than snap.
    pub animated: bool,
}

/// Issues animated scroll jumps and tracks the settle window.
#[derive(Debug, Default)]
pub struct ScrollJumpController {
    settle: SettleTimer,
    last_target: Option<usize>,
}

impl ScrollJumpController {
    /// Creates a controller with the given settle timer.
    pub fn new(settle: SettleTimer) -> Self {
        Self {
            settle,
            last_target: None,
        }
    }

    /// Whether a jump is still settling at `now`.
    pub fn is_jumping(&self, now: Instant) -> bool {
        self.settle.is_active(now)
    }

    /// Target of the most recent jump, if any.
    pub fn last_target(&self) -> Option<usize> {
        self.last_target
    }

    /// Jump to a proportional position in the feed.
    ///
    /// Target pixel is `total_height * ratio`; negative ratios clamp to
    /// the top.
    pub fn jump_to_ratio(&mut self, ratio: f64, total_height: usize, now: Instant) -> ScrollCommand {
        let target_px = (total_height as f64 * ratio.max(0.0)).round() as usize;
        self.issue(target_px, now)
    }

    /// Jump to the top edge of the item at `index`.
    ///
    /// No-op (returns `None`, timer untouched) when the index has no
    /// position yet - callers materialize the target first.
    pub fn jump_to_index(
        &mut self,
        index: usize,
        positions: &PositionIndex,
        now: Instant,
    ) -> Option<ScrollCommand> {
        let position = positions.position(index)?;
        Some(self.issue(position.top, now))
    }

    fn issue(&mut self, target_px: usize, now: Instant) -> ScrollCommand {
        self.settle.start(now);
        self.last_target = Some(target_px);
        tracing::debug!(target_px, "issuing animated scroll jump");
        ScrollCommand {
            target_px,
            animated: true,
        }
    }
}
