//! LRU eviction over cached editor states.
//!
//! Entries that belong to the active tab, to any open tab, or that are dirty
//! are never selected. When only protected entries remain the cache is left
//! above capacity.

use rustc_hash::FxHashSet;

use crate::kernel::clock::Timestamp;
use crate::kernel::tabs::TabId;

/// What the policy needs to know about one cache entry.
#[derive(Debug, Clone, Copy)]
pub struct EvictionCandidate<'a> {
    pub id: &'a TabId,
    pub last_modified: Timestamp,
    pub is_dirty: bool,
    /// Insertion order, used to break timestamp ties.
    pub seq: u64,
}

/// Returns the ids to remove, oldest first.
pub fn select_victims<'a, I>(
    entries: I,
    capacity: usize,
    active: Option<&TabId>,
    open: &FxHashSet<TabId>,
) -> Vec<TabId>
where
    I: IntoIterator<Item = EvictionCandidate<'a>>,
{
    let entries: Vec<EvictionCandidate<'a>> = entries.into_iter().collect();
    if entries.len() <= capacity {
        return Vec::new();
    }
    let excess = entries.len() - capacity;

    let mut candidates: Vec<EvictionCandidate<'a>> = entries
        .into_iter()
        .filter(|e| !e.is_dirty && Some(e.id) != active && !open.contains(e.id))
        .collect();
    candidates.sort_by_key(|e| (e.last_modified, e.seq));

    candidates
        .into_iter()
        .take(excess)
        .map(|e| e.id.clone())
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/eviction.rs"]
mod tests;
