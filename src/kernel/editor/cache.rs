use rustc_hash::{FxHashMap, FxHashSet};

use crate::kernel::clock::Timestamp;
use crate::kernel::tabs::TabId;

use super::eviction::{self, EvictionCandidate};
use super::instance::{EditorInstanceState, EditorStatePatch};

#[derive(Debug, Clone, PartialEq)]
struct CacheEntry {
    state: EditorInstanceState,
    seq: u64,
}

/// Per-tab editor states. Entries may exist for tabs that are not open yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorStateCache {
    entries: FxHashMap<TabId, CacheEntry>,
    next_seq: u64,
}

impl EditorStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.entries.contains_key(id)
    }

    /// Lookup without touching recency.
    pub fn get(&self, id: &TabId) -> Option<&EditorInstanceState> {
        self.entries.get(id).map(|e| &e.state)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TabId, &EditorInstanceState)> {
        let mut entries: Vec<(&TabId, &CacheEntry)> = self.entries.iter().collect();
        entries.sort_by_key(|(_, e)| e.seq);
        entries.into_iter().map(|(id, e)| (id, &e.state))
    }

    /// Creates a default entry unless one is already cached. Returns whether
    /// an entry was created.
    pub fn ensure(&mut self, id: &TabId, now: Timestamp) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.insert(id.clone(), EditorInstanceState::new(now));
        true
    }

    pub fn touch(&mut self, id: &TabId, now: Timestamp) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.state.touch(now);
        true
    }

    pub fn update(&mut self, id: &TabId, patch: EditorStatePatch, now: Timestamp) {
        match self.entries.get_mut(id) {
            Some(entry) => entry.state.apply(patch, now),
            None => {
                let mut state = EditorInstanceState::new(now);
                state.apply(patch, now);
                self.insert(id.clone(), state);
            }
        }
    }

    pub fn remove(&mut self, id: &TabId) -> Option<EditorInstanceState> {
        self.entries.remove(id).map(|e| e.state)
    }

    /// Drops every entry except `id`. Returns the dropped ids.
    pub fn retain_only(&mut self, id: &TabId) -> Vec<TabId> {
        let dropped: Vec<TabId> = self
            .entries
            .keys()
            .filter(|key| *key != id)
            .cloned()
            .collect();
        for key in &dropped {
            self.entries.remove(key);
        }
        dropped
    }

    /// Drops every entry. Returns the dropped ids in insertion order.
    pub fn clear(&mut self) -> Vec<TabId> {
        let ids = self.iter().map(|(id, _)| id.clone()).collect();
        self.entries.clear();
        ids
    }

    /// Runs the eviction policy and removes what it selects.
    pub fn evict(
        &mut self,
        capacity: usize,
        active: Option<&TabId>,
        open: &FxHashSet<TabId>,
    ) -> Vec<TabId> {
        let victims = eviction::select_victims(
            self.entries.iter().map(|(id, e)| EvictionCandidate {
                id,
                last_modified: e.state.last_modified,
                is_dirty: e.state.is_dirty,
                seq: e.seq,
            }),
            capacity,
            active,
            open,
        );
        for id in &victims {
            self.entries.remove(id);
        }
        victims
    }

    fn insert(&mut self, id: TabId, state: EditorInstanceState) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        self.entries.insert(id, CacheEntry { state, seq });
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/cache.rs"]
mod tests;
