//! novel-session: open tabs and cached editor states of a novel-writing app.
//!
//! Module structure:
//! - kernel::tabs: tab registry (open/close/reorder, active pointer)
//! - kernel::editor: per-tab editor state cache and LRU eviction
//! - kernel::store: single mutation entry point, observers, persistence port
//! - kernel::services: config/settings ports and filesystem adapters
//! - replay: drives a store from a recorded list of actions

pub mod kernel;
pub mod replay;
