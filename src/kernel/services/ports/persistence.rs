//! Durability boundary of the session.
//!
//! Tabs, the active pointer and cached editor states are not carried across
//! restarts. The store still goes through this port so that decision lives in
//! one adapter: [`NullPersistenceAdapter`].

use crate::kernel::state::SessionState;

pub trait SessionPersistence {
    /// Called once when the store is built.
    fn restore(&self) -> Option<SessionState>;

    /// Called after every dispatch that changed state. Must not block.
    fn persist(&mut self, state: &SessionState);
}

/// Restores nothing and persists nothing; every launch starts with no tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPersistenceAdapter;

impl SessionPersistence for NullPersistenceAdapter {
    fn restore(&self) -> Option<SessionState> {
        tracing::debug!("session persistence disabled; starting with no tabs");
        None
    }

    fn persist(&mut self, _state: &SessionState) {}
}
