//! JSON-file item store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Item;
use crate::store::{ItemStore, StoreError};

/// Durable item store backed by a single JSON file.
///
/// `save_items` writes the full collection to a temp file and renames it
/// into place, so readers never observe a partially written collection.
/// Timestamps are stored with millisecond precision (the `Item` encoding).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    initialized: bool,
}

impl JsonFileStore {
    /// Create a store for the given file path. No I/O happens until
    /// `init()`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initialized: false,
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.initialized {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ItemStore for JsonFileStore {
    fn init(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.initialized = true;
        Ok(())
    }

    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.ensure_initialized()?;

        let encoded = serde_json::to_vec(items).map_err(|err| StoreError::Corrupt {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;

        tracing::debug!(count = items.len(), path = %self.path.display(), "saved items");
        Ok(())
    }

    fn get_items(&self) -> Result<Vec<Item>, StoreError> {
        self.ensure_initialized()?;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        serde_json::from_slice(&bytes).map_err(|err| StoreError::Corrupt {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }

    fn has_items(&self) -> Result<bool, StoreError> {
        Ok(!self.get_items()?.is_empty())
    }

    fn clear_items(&mut self) -> Result<(), StoreError> {
        self.ensure_initialized()?;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}
