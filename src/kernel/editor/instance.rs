use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::kernel::clock::Timestamp;

/// Content snapshot produced by the rich-text editor. Never inspected here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedState(Arc<str>);

impl SerializedState {
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPoint {
    pub key: CompactString,
    pub offset: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub anchor: SelectionPoint,
    pub focus: SelectionPoint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorInstanceState {
    pub serialized_state: Option<SerializedState>,
    pub selection: Option<SelectionState>,
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub is_dirty: bool,
    pub last_modified: Timestamp,
}

impl EditorInstanceState {
    pub fn new(now: Timestamp) -> Self {
        Self {
            serialized_state: None,
            selection: None,
            scroll_top: 0.0,
            scroll_left: 0.0,
            is_dirty: false,
            last_modified: now,
        }
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_modified = self.last_modified.max(now);
    }

    pub fn apply(&mut self, patch: EditorStatePatch, now: Timestamp) {
        if let Some(serialized) = patch.serialized_state {
            self.serialized_state = Some(serialized);
        }
        if let Some(selection) = patch.selection {
            self.selection = selection;
        }
        if let Some(top) = patch.scroll_top {
            self.scroll_top = top;
        }
        if let Some(left) = patch.scroll_left {
            self.scroll_left = left;
        }
        if let Some(dirty) = patch.is_dirty {
            self.is_dirty = dirty;
        }
        self.touch(now);
    }
}

/// Partial update sent by the editor. Absent fields keep their value;
/// `selection: Some(None)` clears the selection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorStatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_state: Option<SerializedState>,
    #[serde(
        default,
        deserialize_with = "set_or_clear",
        skip_serializing_if = "Option::is_none"
    )]
    pub selection: Option<Option<SelectionState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dirty: Option<bool>,
}

impl EditorStatePatch {
    pub fn content(serialized: SerializedState) -> Self {
        Self {
            serialized_state: Some(serialized),
            ..Self::default()
        }
    }

    pub fn scroll(top: f64, left: f64) -> Self {
        Self {
            scroll_top: Some(top),
            scroll_left: Some(left),
            ..Self::default()
        }
    }

    pub fn dirty(is_dirty: bool) -> Self {
        Self {
            is_dirty: Some(is_dirty),
            ..Self::default()
        }
    }

    pub fn selection(selection: Option<SelectionState>) -> Self {
        Self {
            selection: Some(selection),
            ..Self::default()
        }
    }
}

// A present key (even `null`) means "set"; a missing key falls back to `default`.
fn set_or_clear<'de, D>(deserializer: D) -> Result<Option<Option<SelectionState>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<SelectionState>::deserialize(deserializer).map(Some)
}
