use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(CompactString);

impl WorkspaceId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a document node (chapter, scene, diary entry, folder).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(CompactString);

impl NodeId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tab identity. Always equal to the node it shows, so a node can be open in
/// at most one tab.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(CompactString);

impl TabId {
    pub fn new(raw: impl Into<CompactString>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&NodeId> for TabId {
    fn from(node: &NodeId) -> Self {
        Self(node.0.clone())
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    #[default]
    File,
    Diary,
    Canvas,
    Folder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub workspace_id: WorkspaceId,
    pub node_id: NodeId,
    pub title: String,
    #[serde(default)]
    pub kind: TabKind,
}

impl TabDescriptor {
    pub fn new(
        workspace_id: impl Into<CompactString>,
        node_id: impl Into<CompactString>,
        title: impl Into<String>,
        kind: TabKind,
    ) -> Self {
        Self {
            workspace_id: WorkspaceId::new(workspace_id),
            node_id: NodeId::new(node_id),
            title: title.into(),
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub workspace_id: WorkspaceId,
    pub node_id: NodeId,
    pub title: String,
    pub kind: TabKind,
    pub is_dirty: bool,
}

impl Tab {
    pub fn from_descriptor(descriptor: TabDescriptor) -> Self {
        Self {
            id: TabId::from(&descriptor.node_id),
            workspace_id: descriptor.workspace_id,
            node_id: descriptor.node_id,
            title: descriptor.title,
            kind: descriptor.kind,
            is_dirty: false,
        }
    }
}
