//! Navigation control - validated jumps to arbitrary indices.
//!
//! Validates jump targets, maps quick-jump positions to indices, and holds
//! the navigation loading guard and jump-panel state. The load → rebuild →
//! scroll sequence itself is orchestrated by the feed facade, which owns
//! the loader and the position index.

use thiserror::Error;

use crate::control::single_flight::{FlightPermit, SingleFlight};

/// Errors from navigation requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// Requested target lies outside the dataset. The message is
    /// user-facing and names the valid range.
    #[error("Enter a number from 0 to {max}")]
    OutOfRange {
        /// The rejected target.
        given: i64,
        /// Largest valid index (`total_items - 1`).
        max: usize,
    },
}

/// Quick-jump destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickJump {
    /// First item.
    Start,
    /// `total_items / 2`.
    Middle,
    /// Last item.
    End,
}

impl QuickJump {
    /// The concrete index this destination maps to.
    pub fn target_index(self, total_items: usize) -> usize {
        match self {
            QuickJump::Start => 0,
            QuickJump::Middle => total_items / 2,
            QuickJump::End => total_items.saturating_sub(1),
        }
    }
}

/// Validation, loading guard, and panel state for navigation.
#[derive(Debug, Default)]
pub struct NavigationController {
    loading: SingleFlight,
    show_panel: bool,
}

impl NavigationController {
    /// Creates an idle controller with the panel closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a user-entered target against `[0, total_items)`.
    ///
    /// Out-of-range targets are rejected before any load happens.
    pub fn validate_target(
        &self,
        target_id: i64,
        total_items: usize,
    ) -> Result<usize, NavigationError> {
        if target_id < 0 || target_id as u64 >= total_items as u64 {
            return Err(NavigationError::OutOfRange {
                given: target_id,
                max: total_items.saturating_sub(1),
            });
        }
        Ok(target_id as usize)
    }

    /// Whether a navigation is currently loading.
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    /// Reserve the navigation slot.
    ///
    /// `None` while a navigation is already in progress - the new request
    /// is dropped, never queued. The returned permit releases the flag on
    /// every exit path.
    pub fn try_begin(&self) -> Option<FlightPermit<'_>> {
        self.loading.try_acquire()
    }

    /// Whether the jump panel is open.
    pub fn panel_open(&self) -> bool {
        self.show_panel
    }

    /// Toggle the jump panel.
    pub fn toggle_panel(&mut self) {
        self.show_panel = !self.show_panel;
    }

    /// Close the jump panel.
    pub fn close_panel(&mut self) {
        self.show_panel = false;
    }
}
