//! Scroll-driven control: triggers, guards, and navigation.
//!
//! # Module Structure
//!
//! - `single_flight`: SingleFlight - at-most-one-in-flight guard
//! - `settle`: SettleTimer - superseding deadline for jump animations
//! - `infinite_scroll`: InfiniteScrollTrigger - threshold-based load-more
//! - `scroll_jump`: ScrollJumpController - ratio/index jump commands
//! - `navigation`: NavigationController - validated random-access jumps

pub mod infinite_scroll;
pub mod navigation;
pub mod scroll_jump;
pub mod settle;
pub mod single_flight;

pub use infinite_scroll::{InfiniteScrollTrigger, ScrollMetrics};
pub use navigation::{NavigationController, NavigationError, QuickJump};
pub use scroll_jump::{ScrollCommand, ScrollJumpController};
pub use settle::{SettleTimer, DEFAULT_SETTLE};
pub use single_flight::{FlightPermit, SingleFlight};
