//! View nodes and name validation.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use regex::Regex;
use uuid::Uuid;

use crate::domain::children::ChildList;
use crate::domain::entities::NodeState;
use crate::domain::error::{DomainError, DomainResult};

/// Shared handle to a view; the owning list holds one, readers clone others.
pub type NodeRef = Arc<ViewNode>;

/// What a view is able to hold.
#[derive(Debug)]
pub enum NodeKind {
    /// Plain view
    Leaf,
    /// View nesting further views
    Container(ChildList),
}

/// Single addressable view in the tree.
///
/// The name is unique among direct siblings only. Identity for deletion and
/// rename routing is the `id`, which survives renames and persistence.
#[derive(Debug)]
pub struct ViewNode {
    id: Uuid,
    name: RwLock<String>,
    kind: NodeKind,
}

impl ViewNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::build(Uuid::new_v4(), name.into(), NodeKind::Leaf)
    }

    pub fn container(name: impl Into<String>) -> Self {
        Self::with_children(name, Vec::new())
    }

    pub fn with_children(name: impl Into<String>, children: Vec<NodeRef>) -> Self {
        Self::build(
            Uuid::new_v4(),
            name.into(),
            NodeKind::Container(ChildList::from_nodes(children)),
        )
    }

    fn build(id: Uuid, name: String, kind: NodeKind) -> Self {
        Self {
            id,
            name: RwLock::new(name),
            kind,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> String {
        self.name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Exact, case-sensitive name comparison without cloning.
    pub fn has_name(&self, name: &str) -> bool {
        *self.name.read().unwrap_or_else(PoisonError::into_inner) == name
    }

    /// Only the owning `ChildList` renames, under its write lock.
    pub(crate) fn set_name(&self, name: &str) {
        *self.name.write().unwrap_or_else(PoisonError::into_inner) = name.to_string();
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> Option<&ChildList> {
        match &self.kind {
            NodeKind::Container(children) => Some(children),
            NodeKind::Leaf => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.children().is_some()
    }

    /// Resolve `name` among this view's descendants (never the view itself).
    pub fn resolve(&self, name: &str) -> Option<NodeRef> {
        self.children().and_then(|c| c.resolve(name))
    }

    /// Remove a direct child. Grandchildren are out of reach on purpose:
    /// a view only deletes what it owns.
    pub fn delete_child(&self, node: &ViewNode) -> bool {
        self.children()
            .and_then(|c| c.remove(node.id()))
            .is_some()
    }

    /// Copy of this subtree under a new name, with fresh ids throughout.
    pub fn deep_copy(&self, name: impl Into<String>) -> ViewNode {
        let kind = match &self.kind {
            NodeKind::Leaf => NodeKind::Leaf,
            NodeKind::Container(children) => NodeKind::Container(ChildList::from_nodes(
                children
                    .snapshot()
                    .iter()
                    .map(|c| Arc::new(c.deep_copy(c.name())))
                    .collect(),
            )),
        };
        Self::build(Uuid::new_v4(), name.into(), kind)
    }

    pub fn to_state(&self) -> NodeState {
        NodeState {
            id: self.id,
            name: self.name(),
            children: self
                .children()
                .map(|c| c.snapshot().iter().map(|n| n.to_state()).collect()),
        }
    }

    pub fn from_state(state: &NodeState) -> ViewNode {
        let kind = match &state.children {
            None => NodeKind::Leaf,
            Some(children) => NodeKind::Container(ChildList::from_nodes(
                children
                    .iter()
                    .map(|c| Arc::new(ViewNode::from_state(c)))
                    .collect(),
            )),
        };
        Self::build(state.id, state.name.clone(), kind)
    }
}

impl fmt::Display for ViewNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if self.is_container() {
            write!(f, "/")?;
        }
        Ok(())
    }
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[?*/\\%!@#$^&|<>\[\]:;]").expect("static pattern"))
}

/// Check a view name and return it trimmed.
pub fn validate_name(name: &str) -> DomainResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::malformed(name, "name is empty"));
    }
    if trimmed == "." || trimmed == ".." {
        return Err(DomainError::malformed(name, "'.' and '..' are reserved"));
    }
    if let Some(m) = unsafe_chars().find(trimmed) {
        return Err(DomainError::malformed(
            name,
            format!("'{}' is an unsafe character", m.as_str()),
        ));
    }
    Ok(trimmed)
}
