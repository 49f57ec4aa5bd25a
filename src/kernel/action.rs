use serde::{Deserialize, Serialize};

use crate::kernel::editor::EditorStatePatch;
use crate::kernel::tabs::{TabDescriptor, TabId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    OpenTab(TabDescriptor),
    CloseTab {
        tab_id: TabId,
    },
    CloseOtherTabs {
        tab_id: TabId,
    },
    CloseAllTabs,
    CloseTabsByWorkspace {
        workspace_id: WorkspaceId,
    },
    SetActiveTab {
        tab_id: TabId,
    },
    UpdateTabTitle {
        tab_id: TabId,
        title: String,
    },
    SetTabDirty {
        tab_id: TabId,
        is_dirty: bool,
    },
    ReorderTabs {
        from: usize,
        to: usize,
    },
    /// Sent by the rich-text editor on every meaningful content, selection or
    /// scroll change.
    UpdateEditorState {
        tab_id: TabId,
        #[serde(default)]
        patch: EditorStatePatch,
    },
}
