//! Persistent item store.
//!
//! The engine treats persistence as an advisory collaborator: in-memory
//! state is the source of truth for rendering, and saves are best-effort.
//! This module provides the store interface plus two implementations:
//! - `JsonFileStore` for durable JSON-file persistence
//! - `MemoryStore` for tests and in-process use (supports fault injection)
//!
//! All operations have full-replace semantics for saves and fail with
//! [`StoreError::NotInitialized`] when invoked before a successful `init()`.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::Item;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors from the persistent item store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation was attempted before `init()` succeeded.
    #[error("store not initialized - call init() first")]
    NotInitialized,

    /// Underlying persistence failure. Propagated to the caller, never
    /// retried automatically.
    #[error("store I/O failure at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stored data exists but cannot be decoded.
    #[error("store data corrupt at {path}: {reason}")]
    Corrupt {
        /// Path holding the undecodable data.
        path: PathBuf,
        /// Decode error details.
        reason: String,
    },
}

/// Persistent item store interface.
///
/// Saves are full-replace: `save_items` clears any previously stored
/// collection and repopulates it. Implementations are synchronous; the
/// engine never overlaps two saves for the same collection.
pub trait ItemStore {
    /// Prepare the store for use. Must succeed before any other operation.
    fn init(&mut self) -> Result<(), StoreError>;

    /// Replace the stored collection with `items`.
    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError>;

    /// Load the stored collection. Empty when nothing was ever saved.
    fn get_items(&self) -> Result<Vec<Item>, StoreError>;

    /// Whether a non-empty collection is stored.
    fn has_items(&self) -> Result<bool, StoreError>;

    /// Drop the stored collection.
    fn clear_items(&mut self) -> Result<(), StoreError>;
}
