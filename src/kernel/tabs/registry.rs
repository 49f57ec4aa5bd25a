use rustc_hash::FxHashSet;

use crate::kernel::error::SessionError;

use super::tab::{NodeId, Tab, TabDescriptor, TabId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The node already had a tab; it was focused.
    Focused(TabId),
    Opened(TabId),
}

impl OpenOutcome {
    pub fn tab_id(&self) -> &TabId {
        match self {
            OpenOutcome::Focused(id) | OpenOutcome::Opened(id) => id,
        }
    }
}

/// Ordered list of open tabs across every workspace plus the active pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active: Option<TabId>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_id(&self) -> Option<&TabId> {
        self.active.as_ref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let id = self.active.as_ref()?;
        self.tab(id)
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TabId) -> bool {
        self.position(id).is_some()
    }

    pub fn find_by_node(&self, node_id: &NodeId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.node_id == node_id)
    }

    pub fn is_tab_dirty(&self, id: &TabId) -> bool {
        self.tab(id).is_some_and(|t| t.is_dirty)
    }

    pub fn open_ids(&self) -> FxHashSet<TabId> {
        self.tabs.iter().map(|t| t.id.clone()).collect()
    }

    pub fn tabs_by_workspace(&self, workspace_id: &WorkspaceId) -> Vec<&Tab> {
        self.tabs
            .iter()
            .filter(|t| &t.workspace_id == workspace_id)
            .collect()
    }

    pub fn open(&mut self, descriptor: TabDescriptor) -> OpenOutcome {
        if let Some(existing) = self.find_by_node(&descriptor.node_id) {
            let id = existing.id.clone();
            self.active = Some(id.clone());
            return OpenOutcome::Focused(id);
        }

        let tab = Tab::from_descriptor(descriptor);
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active = Some(id.clone());
        OpenOutcome::Opened(id)
    }

    /// Removes the tab. When it was active, focus moves to the tab that now
    /// sits at the same index, else to the new last tab.
    pub fn close(&mut self, id: &TabId) -> Option<Tab> {
        let index = self.position(id)?;
        let removed = self.tabs.remove(index);

        if self.active.as_ref() == Some(id) {
            self.active = self
                .tabs
                .get(index)
                .or_else(|| self.tabs.last())
                .map(|t| t.id.clone());
        }
        Some(removed)
    }

    /// Keeps only `id`, which becomes active. Returns the ids of the closed
    /// tabs, or `None` if `id` is not open.
    pub fn retain_only(&mut self, id: &TabId) -> Option<Vec<TabId>> {
        let index = self.position(id)?;
        let kept = self.tabs.remove(index);
        let closed = std::mem::take(&mut self.tabs)
            .into_iter()
            .map(|t| t.id)
            .collect();
        self.tabs.push(kept);
        self.active = Some(id.clone());
        Some(closed)
    }

    pub fn clear(&mut self) -> Vec<TabId> {
        self.active = None;
        std::mem::take(&mut self.tabs)
            .into_iter()
            .map(|t| t.id)
            .collect()
    }

    pub fn set_active(&mut self, id: &TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    pub fn set_title(&mut self, id: &TabId, title: String) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| &t.id == id) else {
            return false;
        };
        if tab.title == title {
            return false;
        }
        tab.title = title;
        true
    }

    pub fn set_dirty(&mut self, id: &TabId, is_dirty: bool) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| &t.id == id) else {
            return false;
        };
        if tab.is_dirty == is_dirty {
            return false;
        }
        tab.is_dirty = is_dirty;
        true
    }

    /// Moves the tab at `from` so that it ends up at index `to`. Both indices
    /// must address an existing tab; nothing is clamped.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<bool, SessionError> {
        let len = self.tabs.len();
        if from >= len || to >= len {
            return Err(SessionError::ReorderOutOfRange { from, to, len });
        }
        if from == to {
            return Ok(false);
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        Ok(true)
    }

    /// Closes every tab of the workspace. If the active tab was among them the
    /// first remaining tab becomes active.
    pub fn close_workspace(&mut self, workspace_id: &WorkspaceId) -> Vec<TabId> {
        let (closed, remaining): (Vec<Tab>, Vec<Tab>) = std::mem::take(&mut self.tabs)
            .into_iter()
            .partition(|t| &t.workspace_id == workspace_id);
        self.tabs = remaining;

        let active_closed = self
            .active
            .as_ref()
            .is_some_and(|active| closed.iter().any(|t| &t.id == active));
        if active_closed {
            self.active = self.tabs.first().map(|t| t.id.clone());
        }

        closed.into_iter().map(|t| t.id).collect()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/tabs/registry.rs"]
mod tests;
