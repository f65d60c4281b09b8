//! Deterministic batch generation.
//!
//! Item content is derived purely from the item index: a SplitMix64 hash of
//! the index picks the phrase and a timestamp offset back from a fixed
//! epoch. Regenerating any index yields an identical item, which keeps
//! store round trips and random-access jumps consistent with previously
//! generated batches.

use chrono::{DateTime, Utc};

use crate::model::Item;

/// Fixed reference instant for generated timestamps (2024-01-01T00:00:00Z).
const EPOCH_MS: i64 = 1_704_067_200_000;

/// Spread of generated timestamps behind the epoch, in milliseconds
/// (~115 days).
const TIMESTAMP_RANGE_MS: u64 = 10_000_000_000;

const PHRASES: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco.",
    "Duis aute irure dolor in reprehenderit in voluptate velit.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa.",
];

/// SplitMix64 finalizer; good avalanche behavior for sequential keys.
fn hash_index(index: u64) -> u64 {
    let mut z = index.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn timestamp_for(index: u64) -> DateTime<Utc> {
    let offset = hash_index(index) % TIMESTAMP_RANGE_MS;
    // EPOCH_MS - offset is always within chrono's representable range.
    DateTime::from_timestamp_millis(EPOCH_MS - offset as i64).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Fabricate the item with the given index.
///
/// Pure function of `index`: id, text, and timestamp are all derived from
/// it, so generation is idempotent across runs.
pub fn generate_item(index: u64) -> Item {
    let phrase = PHRASES[(hash_index(index ^ 0x5eed) % PHRASES.len() as u64) as usize];
    Item {
        id: index,
        text: format!("Message #{index} - {phrase}"),
        timestamp: timestamp_for(index),
    }
}

/// Produce up to `count` items starting at `start_index`, never generating
/// at or past `total_items`. Returns an empty batch when `start_index` is
/// already beyond the configured total.
pub fn generate_batch(start_index: usize, count: usize, total_items: usize) -> Vec<Item> {
    let end = start_index.saturating_add(count).min(total_items);
    (start_index..end).map(|i| generate_item(i as u64)).collect()
}
