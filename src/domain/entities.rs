//! Domain entities: requests, events and the persisted tree shape

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item owned by the parent collection and surfaced through views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Actions guarded by the external permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Add a view to the tree
    CreateView,
    /// Rename a view
    ConfigureView,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::CreateView => write!(f, "create-view"),
            Permission::ConfigureView => write!(f, "configure-view"),
        }
    }
}

/// How a new view is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateMode {
    /// A plain view without children
    Leaf,
    /// An empty view that can nest other views
    Container,
    /// A deep copy of the view currently resolved under the given name
    CopyOf(String),
}

/// Request to construct a view node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRequest {
    pub name: String,
    pub mode: CreateMode,
}

impl NodeRequest {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: CreateMode::Leaf,
        }
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: CreateMode::Container,
        }
    }

    pub fn copy_of(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: CreateMode::CopyOf(source.into()),
        }
    }
}

/// Request forwarded to the owning collection to create an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub name: String,
}

impl ItemRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Rename notification routed through the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    /// A view was renamed (identified by id, the old name is informational)
    View {
        id: Uuid,
        old_name: String,
        new_name: String,
    },
    /// An item of the owning collection was renamed
    Item { old_name: String, new_name: String },
}

/// Persisted shape of a single view and its subtree.
///
/// `children` is present exactly for container views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeState>>,
}

/// Persisted shape of a whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeState {
    pub name: String,
    pub job_names: Vec<String>,
    pub views: Vec<NodeState>,
}
