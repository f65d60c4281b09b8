//! Domain model types (pure).
//!
//! All types in this module are pure data; layout and loading logic live in
//! `engine` and `loader`.

pub mod item;

// Re-export for convenience
pub use item::{Item, ItemPosition, VirtualItem};
