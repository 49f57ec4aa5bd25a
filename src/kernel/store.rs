use crate::kernel::clock::{Clock, SystemClock};
use crate::kernel::editor::EditorInstanceState;
use crate::kernel::services::ports::{NullPersistenceAdapter, SessionConfig, SessionPersistence};
use crate::kernel::services::{session_bus, SessionEventReceiver, SessionEventSender};
use crate::kernel::tabs::{Tab, TabId, WorkspaceId};

use super::{Action, SessionEvent, SessionSnapshot, SessionState};

pub struct DispatchResult {
    pub events: Vec<SessionEvent>,
    pub state_changed: bool,
}

/// Sole owner of the session. Every mutation goes through [`Store::dispatch`].
pub struct Store {
    state: SessionState,
    clock: Box<dyn Clock>,
    persistence: Box<dyn SessionPersistence>,
    subscribers: Vec<SessionEventSender>,
}

impl Store {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(SystemClock::new()),
            Box::new(NullPersistenceAdapter),
        )
    }

    pub fn with_parts(
        config: SessionConfig,
        clock: Box<dyn Clock>,
        persistence: Box<dyn SessionPersistence>,
    ) -> Self {
        let mut state = persistence
            .restore()
            .unwrap_or_else(|| SessionState::new(&config));
        state.set_capacity(config.editor_state_capacity);

        Self {
            state,
            clock,
            persistence,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tabs(&self) -> &[Tab] {
        self.state.tabs()
    }

    pub fn tabs_by_workspace(&self, workspace_id: &WorkspaceId) -> Vec<&Tab> {
        self.state.tabs_by_workspace(workspace_id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.state.active_tab()
    }

    pub fn editor_state(&self, tab_id: &TabId) -> Option<&EditorInstanceState> {
        self.state.editor_state(tab_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Registers an observer. Events of every later dispatch are sent to it
    /// until the receiver is dropped.
    pub fn subscribe(&mut self) -> SessionEventReceiver {
        let (tx, rx) = session_bus();
        self.subscribers.push(tx);
        rx
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        tracing::trace!(?action, "dispatch");

        let now = self.clock.now();
        let (state_changed, events) = self.state.dispatch_action(action, now);

        if state_changed {
            self.persistence.persist(&self.state);
        }
        self.publish(&events);

        DispatchResult {
            events,
            state_changed,
        }
    }

    fn publish(&mut self, events: &[SessionEvent]) {
        if events.is_empty() || self.subscribers.is_empty() {
            return;
        }
        self.subscribers.retain(|tx| {
            events
                .iter()
                .all(|event| tx.send(event.clone()).is_ok())
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
