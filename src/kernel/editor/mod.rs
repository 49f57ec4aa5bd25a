//! Cached per-tab editor state and its eviction policy.

pub mod cache;
pub mod eviction;
pub mod instance;

pub use cache::EditorStateCache;
pub use eviction::{select_victims, EvictionCandidate};
pub use instance::{
    EditorInstanceState, EditorStatePatch, SelectionPoint, SelectionState, SerializedState,
};
