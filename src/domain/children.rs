//! Copy-on-write list of sibling views.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::NodeRef;

/// Ordered, sibling-unique sequence of views shared between threads.
///
/// Readers take a snapshot (`Arc` clone under a short read lock) and iterate
/// without holding any lock. Writers go through `Arc::make_mut`, which copies
/// the vector only while some reader still holds the previous snapshot, so a
/// reader sees either the old or the new list and never a partial one.
#[derive(Debug, Default)]
pub struct ChildList {
    nodes: RwLock<Arc<Vec<NodeRef>>>,
}

impl ChildList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from restored nodes, dropping later duplicates by name.
    pub fn from_nodes(nodes: Vec<NodeRef>) -> Self {
        let mut unique: Vec<NodeRef> = Vec::with_capacity(nodes.len());
        for node in nodes {
            if unique.iter().any(|n| n.name() == node.name()) {
                warn!("dropping duplicate sibling view: {}", node.name());
                continue;
            }
            unique.push(node);
        }
        Self {
            nodes: RwLock::new(Arc::new(unique)),
        }
    }

    /// Immutable view of the current children.
    pub fn snapshot(&self) -> Arc<Vec<NodeRef>> {
        Arc::clone(&*self.nodes.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Append `node` at the end.
    ///
    /// Fails with `NameTaken` if a sibling already uses the name; the list is
    /// unchanged in that case.
    #[instrument(level = "trace", skip(self, node), fields(name = %node.name()))]
    pub fn push(&self, node: NodeRef) -> DomainResult<()> {
        let mut guard = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        let name = node.name();
        if guard.iter().any(|n| n.has_name(&name)) {
            return Err(DomainError::NameTaken(name));
        }
        Arc::make_mut(&mut *guard).push(node);
        Ok(())
    }

    /// Remove the direct child with `id`, returning it if present.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&self, id: Uuid) -> Option<NodeRef> {
        let mut guard = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
        let pos = guard.iter().position(|n| n.id() == id)?;
        Some(Arc::make_mut(&mut *guard).remove(pos))
    }

    /// Direct child with exactly this name.
    pub fn get(&self, name: &str) -> Option<NodeRef> {
        self.snapshot().iter().find(|n| n.has_name(name)).cloned()
    }

    /// Resolve `name` anywhere below this list.
    ///
    /// Direct children are matched first, in insertion order. Only if none
    /// matches are containers searched, again in insertion order, each one
    /// applying the same rule recursively. A shallow view therefore shadows
    /// any deeper view with the same name.
    pub fn resolve(&self, name: &str) -> Option<NodeRef> {
        let nodes = self.snapshot();
        if let Some(hit) = nodes.iter().find(|n| n.has_name(name)) {
            return Some(Arc::clone(hit));
        }
        nodes
            .iter()
            .filter_map(|n| n.children())
            .find_map(|children| children.resolve(name))
    }

    /// Depth-first search by identity.
    pub fn find_by_id(&self, id: Uuid) -> Option<NodeRef> {
        let nodes = self.snapshot();
        if let Some(hit) = nodes.iter().find(|n| n.id() == id) {
            return Some(Arc::clone(hit));
        }
        nodes
            .iter()
            .filter_map(|n| n.children())
            .find_map(|children| children.find_by_id(id))
    }

    /// Rename the view with `id`, searching this list and all nested lists.
    ///
    /// Uniqueness is checked against the view's own siblings while holding
    /// that list's write lock. Returns the previous name, or `None` if no view
    /// has this id.
    #[instrument(level = "trace", skip(self))]
    pub fn rename(&self, id: Uuid, new_name: &str) -> DomainResult<Option<String>> {
        {
            let guard = self.nodes.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(target) = guard.iter().find(|n| n.id() == id) {
                let old = target.name();
                if old == new_name {
                    return Ok(Some(old));
                }
                if guard.iter().any(|n| n.id() != id && n.has_name(new_name)) {
                    return Err(DomainError::NameTaken(new_name.to_string()));
                }
                target.set_name(new_name);
                return Ok(Some(old));
            }
        }
        for children in self.snapshot().iter().filter_map(|n| n.children()) {
            if let Some(old) = children.rename(id, new_name)? {
                return Ok(Some(old));
            }
        }
        Ok(None)
    }
}
