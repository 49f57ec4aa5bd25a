use serde::{Deserialize, Serialize};

use crate::kernel::clock::Timestamp;
use crate::kernel::editor::{EditorInstanceState, EditorStateCache, EditorStatePatch};
use crate::kernel::services::ports::SessionConfig;
use crate::kernel::tabs::{OpenOutcome, Tab, TabDescriptor, TabId, TabRegistry, WorkspaceId};
use crate::kernel::{Action, SessionEvent};

/// Open tabs plus the cache of their editor states.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    tabs: TabRegistry,
    editor_states: EditorStateCache,
    capacity: usize,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            tabs: TabRegistry::new(),
            editor_states: EditorStateCache::new(),
            capacity: config.editor_state_capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn editor_states(&self) -> &EditorStateCache {
        &self.editor_states
    }

    pub fn tabs(&self) -> &[Tab] {
        self.tabs.tabs()
    }

    pub fn tabs_by_workspace(&self, workspace_id: &WorkspaceId) -> Vec<&Tab> {
        self.tabs.tabs_by_workspace(workspace_id)
    }

    pub fn active_tab_id(&self) -> Option<&TabId> {
        self.tabs.active_id()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.active_tab()
    }

    pub fn is_tab_dirty(&self, tab_id: &TabId) -> bool {
        self.tabs.is_tab_dirty(tab_id)
    }

    /// Read-only; does not count as an access for eviction.
    pub fn editor_state(&self, tab_id: &TabId) -> Option<&EditorInstanceState> {
        self.editor_states.get(tab_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tabs: self.tabs.tabs().to_vec(),
            active_tab_id: self.tabs.active_id().cloned(),
            editor_states: self
                .editor_states
                .iter()
                .map(|(id, state)| CachedStateSummary::new(id, state))
                .collect(),
        }
    }

    pub fn dispatch_action(
        &mut self,
        action: Action,
        now: Timestamp,
    ) -> (bool, Vec<SessionEvent>) {
        let previous = self.tabs.active_id().cloned();

        let (changed, mut events) = match action {
            Action::OpenTab(descriptor) => self.open_tab(descriptor, now),
            Action::CloseTab { tab_id } => self.close_tab(&tab_id),
            Action::CloseOtherTabs { tab_id } => self.close_other_tabs(&tab_id),
            Action::CloseAllTabs => self.close_all_tabs(),
            Action::CloseTabsByWorkspace { workspace_id } => {
                self.close_tabs_by_workspace(&workspace_id)
            }
            Action::SetActiveTab { tab_id } => self.set_active_tab(&tab_id, now),
            Action::UpdateTabTitle { tab_id, title } => self.update_tab_title(tab_id, title),
            Action::SetTabDirty { tab_id, is_dirty } => self.set_tab_dirty(tab_id, is_dirty),
            Action::ReorderTabs { from, to } => self.reorder_tabs(from, to),
            Action::UpdateEditorState { tab_id, patch } => {
                self.update_editor_state(tab_id, patch, now)
            }
        };

        let current = self.tabs.active_id().cloned();
        let active_changed = previous != current;
        if active_changed {
            events.push(SessionEvent::ActiveTabChanged { previous, current });
        }

        (changed || active_changed, events)
    }

    fn open_tab(
        &mut self,
        descriptor: TabDescriptor,
        now: Timestamp,
    ) -> (bool, Vec<SessionEvent>) {
        match self.tabs.open(descriptor) {
            OpenOutcome::Focused(tab_id) => {
                let touched = self.editor_states.touch(&tab_id, now);
                (touched, vec![SessionEvent::TabFocused { tab_id }])
            }
            OpenOutcome::Opened(tab_id) => {
                // A pre-warmed state is kept as is.
                self.editor_states.ensure(&tab_id, now);
                let mut events = vec![SessionEvent::TabOpened { tab_id }];
                events.extend(self.evict());
                (true, events)
            }
        }
    }

    fn close_tab(&mut self, tab_id: &TabId) -> (bool, Vec<SessionEvent>) {
        if self.tabs.close(tab_id).is_none() {
            return (false, Vec::new());
        }

        let mut events = vec![SessionEvent::TabsClosed {
            tab_ids: vec![tab_id.clone()],
        }];
        if self.editor_states.remove(tab_id).is_some() {
            events.push(SessionEvent::EditorStatesReleased {
                tab_ids: vec![tab_id.clone()],
            });
        }
        (true, events)
    }

    fn close_other_tabs(&mut self, tab_id: &TabId) -> (bool, Vec<SessionEvent>) {
        let Some(closed) = self.tabs.retain_only(tab_id) else {
            return (false, Vec::new());
        };
        let released = self.editor_states.retain_only(tab_id);

        let changed = !closed.is_empty() || !released.is_empty();
        (changed, closed_events(closed, released))
    }

    fn close_all_tabs(&mut self) -> (bool, Vec<SessionEvent>) {
        let closed = self.tabs.clear();
        let released = self.editor_states.clear();

        let changed = !closed.is_empty() || !released.is_empty();
        (changed, closed_events(closed, released))
    }

    fn close_tabs_by_workspace(
        &mut self,
        workspace_id: &WorkspaceId,
    ) -> (bool, Vec<SessionEvent>) {
        let closed = self.tabs.close_workspace(workspace_id);
        let released: Vec<TabId> = closed
            .iter()
            .filter(|id| self.editor_states.remove(id).is_some())
            .cloned()
            .collect();

        (!closed.is_empty(), closed_events(closed, released))
    }

    fn set_active_tab(&mut self, tab_id: &TabId, now: Timestamp) -> (bool, Vec<SessionEvent>) {
        if !self.tabs.set_active(tab_id) {
            return (false, Vec::new());
        }
        (self.editor_states.touch(tab_id, now), Vec::new())
    }

    fn update_tab_title(&mut self, tab_id: TabId, title: String) -> (bool, Vec<SessionEvent>) {
        if !self.tabs.set_title(&tab_id, title.clone()) {
            return (false, Vec::new());
        }
        (true, vec![SessionEvent::TabTitleChanged { tab_id, title }])
    }

    fn set_tab_dirty(&mut self, tab_id: TabId, is_dirty: bool) -> (bool, Vec<SessionEvent>) {
        if !self.tabs.set_dirty(&tab_id, is_dirty) {
            return (false, Vec::new());
        }
        (true, vec![SessionEvent::TabDirtyChanged { tab_id, is_dirty }])
    }

    fn reorder_tabs(&mut self, from: usize, to: usize) -> (bool, Vec<SessionEvent>) {
        match self.tabs.reorder(from, to) {
            Ok(true) => (true, vec![SessionEvent::TabsReordered { from, to }]),
            Ok(false) => (false, Vec::new()),
            Err(err) => {
                tracing::warn!(error = %err, "reorder rejected");
                (false, Vec::new())
            }
        }
    }

    fn update_editor_state(
        &mut self,
        tab_id: TabId,
        patch: EditorStatePatch,
        now: Timestamp,
    ) -> (bool, Vec<SessionEvent>) {
        self.editor_states.update(&tab_id, patch, now);
        let mut events = vec![SessionEvent::EditorStateUpdated { tab_id }];
        events.extend(self.evict());
        (true, events)
    }

    fn evict(&mut self) -> Option<SessionEvent> {
        if self.editor_states.len() <= self.capacity {
            return None;
        }

        let open = self.tabs.open_ids();
        let evicted = self
            .editor_states
            .evict(self.capacity, self.tabs.active_id(), &open);

        let remaining = self.editor_states.len();
        if remaining > self.capacity {
            tracing::debug!(
                remaining,
                capacity = self.capacity,
                "editor state cache over capacity; remaining entries are protected"
            );
        }
        if evicted.is_empty() {
            return None;
        }
        tracing::debug!(evicted = ?evicted, "evicted editor states");
        Some(SessionEvent::EditorStatesEvicted { tab_ids: evicted })
    }
}

fn closed_events(closed: Vec<TabId>, released: Vec<TabId>) -> Vec<SessionEvent> {
    let mut events = Vec::with_capacity(2);
    if !closed.is_empty() {
        events.push(SessionEvent::TabsClosed { tab_ids: closed });
    }
    if !released.is_empty() {
        events.push(SessionEvent::EditorStatesReleased { tab_ids: released });
    }
    events
}

/// Read-only projection handed to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<TabId>,
    pub editor_states: Vec<CachedStateSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedStateSummary {
    pub tab_id: TabId,
    pub is_dirty: bool,
    pub last_modified: Timestamp,
    pub content_len: Option<usize>,
    pub scroll_top: f64,
    pub scroll_left: f64,
}

impl CachedStateSummary {
    fn new(tab_id: &TabId, state: &EditorInstanceState) -> Self {
        Self {
            tab_id: tab_id.clone(),
            is_dirty: state.is_dirty,
            last_modified: state.last_modified,
            content_len: state.serialized_state.as_ref().map(|s| s.len()),
            scroll_top: state.scroll_top,
            scroll_left: state.scroll_left,
        }
    }
}
