//! Batched item loading and generation.
//!
//! - `generate`: deterministic item fabrication keyed by index
//! - `paged`: PagedLoader - pagination state, infinite-scroll batches,
//!   random-access materialization, restore/reset lifecycle

pub mod generate;
pub mod paged;

pub use generate::{generate_batch, generate_item};
pub use paged::{PagedLoader, RestoreOutcome};
