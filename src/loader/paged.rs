//! PagedLoader - batched, resumable item loading.
//!
//! Owns the item collection and grows it in fixed-size batches: infinite
//! scroll appends one batch at a time, random-access jumps append as many
//! batches as the target index needs. Persistence is advisory - the
//! in-memory collection is the source of truth for rendering, and a failed
//! save is logged, never rolled back.

use crate::config::Settings;
use crate::loader::generate::generate_batch;
use crate::model::Item;
use crate::store::ItemStore;

/// Outcome of [`PagedLoader::restore_or_initialize`].
///
/// Reports how the collection was materialized and how many items are now
/// loaded, so a host can stage its first render (show an initial slice,
/// then the full restored set) if it wants the perceived-latency win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The store held a previous session's collection; it was loaded.
    Restored(usize),
    /// Nothing usable in the store; a fresh collection was generated.
    Generated(usize),
}

/// Batched item loader with pagination state.
///
/// `has_more` is monotonic: once false it stays false until an explicit
/// re-initialization (`initialize`, `restore_or_initialize`, or
/// `reset_and_regenerate`).
#[derive(Debug)]
pub struct PagedLoader {
    items: Vec<Item>,
    current_page: usize,
    has_more: bool,
    total_items: usize,
    items_per_page: usize,
    initial_items: usize,
}

impl PagedLoader {
    /// Create an empty loader configured from `settings`. No items are
    /// loaded until an initialize/restore call.
    pub fn new(settings: &Settings) -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            has_more: settings.total_items > 0,
            total_items: settings.total_items,
            items_per_page: settings.items_per_page,
            initial_items: settings.initial_items,
        }
    }

    /// The loaded collection, in index order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item at `index`, if loaded.
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Number of loaded items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are loaded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether further batches can still be loaded.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of whole pages consumed so far; the next batch starts at
    /// `current_page * items_per_page`.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replace the collection with the initial batch `[0, initial_items)`
    /// and persist it (fire-and-forget).
    pub fn initialize(&mut self, store: &mut dyn ItemStore) {
        self.items = generate_batch(0, self.initial_items, self.total_items);
        self.reset_pagination_from_len();
        tracing::info!(count = self.items.len(), "initialized fresh collection");
        self.persist(store);
    }

    /// Append the next batch, if any.
    ///
    /// Returns `true` when items were appended. No-op when `has_more` is
    /// already false; an empty generated batch flips `has_more` to false.
    pub fn load_more(&mut self, store: &mut dyn ItemStore) -> bool {
        if !self.has_more {
            return false;
        }

        let start_index = self.current_page * self.items_per_page;
        let batch = generate_batch(start_index, self.items_per_page, self.total_items);
        if batch.is_empty() {
            self.has_more = false;
            return false;
        }

        self.items.extend(batch);
        self.current_page += 1;
        self.has_more = self.items.len() < self.total_items;
        tracing::debug!(
            start_index,
            count = self.items.len(),
            has_more = self.has_more,
            "loaded batch"
        );
        self.persist(store);
        true
    }

    /// Load batches until the item at `target_index` is present.
    ///
    /// Silently does nothing when the target is outside `[0, total_items)`
    /// or already loaded. Otherwise appends
    /// `ceil((target_index + 1 - len) / items_per_page)` batches, stopping
    /// early if the loader runs out of items.
    pub fn load_up_to_index(&mut self, store: &mut dyn ItemStore, target_index: usize) {
        if target_index >= self.total_items || target_index < self.items.len() {
            return;
        }

        let missing = target_index + 1 - self.items.len();
        let batches_needed = missing.div_ceil(self.items_per_page);
        for _ in 0..batches_needed {
            if !self.has_more {
                break;
            }
            self.load_more(store);
        }
    }

    /// Load the previous session's collection from the store, or generate a
    /// fresh one.
    ///
    /// Store failures during restoration (init, lookup, read) abort the
    /// restoration and fall back to fresh generation - the engine never
    /// comes up without data.
    pub fn restore_or_initialize(&mut self, store: &mut dyn ItemStore) -> RestoreOutcome {
        match Self::try_restore(store) {
            Ok(Some(items)) => {
                self.items = items;
                self.reset_pagination_from_len();
                tracing::info!(count = self.items.len(), "restored collection from store");
                RestoreOutcome::Restored(self.items.len())
            }
            Ok(None) => {
                self.initialize(store);
                RestoreOutcome::Generated(self.items.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "restoration failed, generating fresh collection");
                self.initialize(store);
                RestoreOutcome::Generated(self.items.len())
            }
        }
    }

    /// Clear the store and regenerate the initial collection.
    pub fn reset_and_regenerate(&mut self, store: &mut dyn ItemStore) {
        if let Err(err) = store.clear_items() {
            // Advisory, like saves: the regenerated in-memory collection is
            // authoritative and the next save is full-replace anyway.
            tracing::warn!(error = %err, "failed to clear store before regeneration");
        }
        self.initialize(store);
    }

    fn try_restore(store: &mut dyn ItemStore) -> Result<Option<Vec<Item>>, crate::store::StoreError> {
        store.init()?;
        if !store.has_items()? {
            return Ok(None);
        }
        let items = store.get_items()?;
        Ok(if items.is_empty() { None } else { Some(items) })
    }

    /// Recompute pagination state after a wholesale replacement.
    ///
    /// `current_page` counts whole pages consumed, so the next batch starts
    /// at the first page boundary not covered by the loaded prefix.
    fn reset_pagination_from_len(&mut self) {
        self.current_page = self.items.len().div_ceil(self.items_per_page);
        self.has_more = self.items.len() < self.total_items;
    }

    fn persist(&self, store: &mut dyn ItemStore) {
        if let Err(err) = store.save_items(&self.items) {
            tracing::warn!(error = %err, "failed to persist items (in-memory state kept)");
        }
    }
}
