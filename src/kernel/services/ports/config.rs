use serde::{Deserialize, Serialize};

pub const DEFAULT_EDITOR_STATE_CAPACITY: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Soft limit on cached editor states. Protected entries may exceed it.
    pub editor_state_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            editor_state_capacity: DEFAULT_EDITOR_STATE_CAPACITY,
        }
    }
}

impl SessionConfig {
    pub fn with_capacity(editor_state_capacity: usize) -> Self {
        Self {
            editor_state_capacity,
        }
    }
}
