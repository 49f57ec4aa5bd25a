//! Open tabs and the active-tab pointer.

pub mod registry;
pub mod tab;

pub use registry::{OpenOutcome, TabRegistry};
pub use tab::{NodeId, Tab, TabDescriptor, TabId, TabKind, WorkspaceId};
