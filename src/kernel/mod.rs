//! Headless session core (state/action/event).

pub mod action;
pub mod clock;
pub mod editor;
pub mod error;
pub mod event;
pub mod services;
pub mod state;
pub mod store;
pub mod tabs;

pub use action::Action;
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use editor::{
    EditorInstanceState, EditorStateCache, EditorStatePatch, SelectionPoint, SelectionState,
    SerializedState,
};
pub use error::SessionError;
pub use event::SessionEvent;
pub use state::{CachedStateSummary, SessionSnapshot, SessionState};
pub use store::{DispatchResult, Store};
pub use tabs::{NodeId, Tab, TabDescriptor, TabId, TabKind, TabRegistry, WorkspaceId};
