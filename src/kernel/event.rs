use serde::{Deserialize, Serialize};

use crate::kernel::tabs::TabId;

/// Change notifications published after each dispatch, in the order the
/// changes were applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    TabOpened {
        tab_id: TabId,
    },
    /// `open_tab` on a node that already had a tab.
    TabFocused {
        tab_id: TabId,
    },
    TabsClosed {
        tab_ids: Vec<TabId>,
    },
    ActiveTabChanged {
        previous: Option<TabId>,
        current: Option<TabId>,
    },
    TabTitleChanged {
        tab_id: TabId,
        title: String,
    },
    TabDirtyChanged {
        tab_id: TabId,
        is_dirty: bool,
    },
    TabsReordered {
        from: usize,
        to: usize,
    },
    EditorStateUpdated {
        tab_id: TabId,
    },
    /// States dropped because their tab was closed.
    EditorStatesReleased {
        tab_ids: Vec<TabId>,
    },
    /// States dropped by the LRU policy.
    EditorStatesEvicted {
        tab_ids: Vec<TabId>,
    },
}
