//! Eviction ordering

use crate::inventory::{CacheEntry, Inventory};

/// Order the inventory for eviction, least recently accessed first
///
/// The sort is stable, so entries with equal access times keep their
/// traversal order. The planner does not decide how many entries to delete;
/// the caller stops consuming once the budget is satisfied.
pub fn eviction_order(inventory: Inventory) -> Vec<CacheEntry> {
    let mut entries = inventory.into_entries();
    entries.sort_by_key(|entry| entry.accessed);
    entries
}
