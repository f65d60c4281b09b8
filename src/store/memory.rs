//! In-memory item store.

use std::path::PathBuf;

use crate::model::Item;
use crate::store::{ItemStore, StoreError};

/// In-process item store.
///
/// Behaves like the file-backed store (including the `NotInitialized`
/// guard) without touching the filesystem. Tests use it directly, and
/// `fail_next_save` injects a one-shot save failure to exercise the
/// advisory-persistence policy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Vec<Item>,
    initialized: bool,
    fail_next_save: bool,
}

impl MemoryStore {
    /// Create an empty, uninitialized store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `save_items` call fail with an I/O error.
    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }

    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.initialized {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }
}

impl ItemStore for MemoryStore {
    fn init(&mut self) -> Result<(), StoreError> {
        self.initialized = true;
        Ok(())
    }

    fn save_items(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.ensure_initialized()?;
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("injected save failure"),
            });
        }
        self.items = items.to_vec();
        Ok(())
    }

    fn get_items(&self) -> Result<Vec<Item>, StoreError> {
        self.ensure_initialized()?;
        Ok(self.items.clone())
    }

    fn has_items(&self) -> Result<bool, StoreError> {
        self.ensure_initialized()?;
        Ok(!self.items.is_empty())
    }

    fn clear_items(&mut self) -> Result<(), StoreError> {
        self.ensure_initialized()?;
        self.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: u64) -> Item {
        Item {
            id,
            text: format!("Message #{id}"),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn guards_against_use_before_init() {
        let store = MemoryStore::new();
        assert!(matches!(store.get_items(), Err(StoreError::NotInitialized)));
    }

    #[test]
    fn save_is_full_replace() {
        let mut store = MemoryStore::new();
        store.init().unwrap();

        store.save_items(&[item(0), item(1)]).unwrap();
        store.save_items(&[item(9)]).unwrap();

        let loaded = store.get_items().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 9);
    }

    #[test]
    fn injected_failure_fires_once() {
        let mut store = MemoryStore::new();
        store.init().unwrap();
        store.fail_next_save();

        assert!(matches!(
            store.save_items(&[item(0)]),
            Err(StoreError::Io { .. })
        ));
        // Next save succeeds again.
        store.save_items(&[item(0)]).unwrap();
        assert!(store.has_items().unwrap());
    }
}
