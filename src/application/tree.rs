//! The view tree: root aggregate over nested views
//!
//! Handles creation, deletion, lookup and enumeration of views, item creation
//! through the owning collection, and rename routing. Every structural change
//! ends with a call to the persister.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::factory::RequestNodeFactory;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    validate_name, ChildList, DomainError, Item, ItemRequest, NameSet, NodeRef, NodeRequest,
    Permission, RenameEvent, Row, TreeState, ViewNode,
};
use crate::infrastructure::traits::{NodeFactory, OwningCollection, PermissionCheck, Persister};

/// Collaborators a tree calls outward through.
#[derive(Clone)]
pub struct TreeDeps {
    pub owner: OwningCollection,
    pub permissions: Arc<dyn PermissionCheck>,
    pub persister: Arc<dyn Persister>,
    pub factory: Arc<dyn NodeFactory>,
}

impl TreeDeps {
    /// Dependencies using the default request factory.
    pub fn new(
        owner: OwningCollection,
        permissions: Arc<dyn PermissionCheck>,
        persister: Arc<dyn Persister>,
    ) -> Self {
        Self {
            owner,
            permissions,
            persister,
            factory: Arc::new(RequestNodeFactory),
        }
    }

    pub fn with_factory(mut self, factory: Arc<dyn NodeFactory>) -> Self {
        self.factory = factory;
        self
    }
}

/// Hierarchical registry of named views.
///
/// Safe to share between threads: view lists are copy-on-write, the name set
/// is lock-protected, and item listing is serialized. Saves are serialized as
/// well, each one snapshotting the state after taking the lock, so the last
/// write always carries the latest tree.
pub struct ViewTree {
    name: String,
    views: ChildList,
    job_names: NameSet,
    deps: TreeDeps,
    items_lock: Mutex<()>,
    save_lock: Mutex<()>,
}

impl fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewTree")
            .field("name", &self.name)
            .field("views", &self.views)
            .field("job_names", &self.job_names)
            .finish_non_exhaustive()
    }
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new(name: impl Into<String>, deps: TreeDeps) -> Self {
        Self {
            name: name.into(),
            views: ChildList::new(),
            job_names: NameSet::new(),
            deps,
            items_lock: Mutex::new(()),
            save_lock: Mutex::new(()),
        }
    }

    /// Rebuild a tree from its persisted state.
    pub fn from_state(state: &TreeState, deps: TreeDeps) -> Self {
        debug!(
            "from_state: name={} views={} job_names={}",
            state.name,
            state.views.len(),
            state.job_names.len()
        );
        Self {
            name: state.name.clone(),
            views: ChildList::from_nodes(
                state
                    .views
                    .iter()
                    .map(|s| Arc::new(ViewNode::from_state(s)))
                    .collect(),
            ),
            job_names: NameSet::from_names(state.job_names.iter().cloned()),
            deps,
            items_lock: Mutex::new(()),
            save_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the top-level views; later mutations don't show up in it.
    pub fn views(&self) -> Arc<Vec<NodeRef>> {
        self.views.snapshot()
    }

    /// Names of items created through this tree.
    pub fn job_names(&self) -> &NameSet {
        &self.job_names
    }

    pub fn owner(&self) -> &OwningCollection {
        &self.deps.owner
    }

    /// Find a view by name.
    ///
    /// Top-level views are tried first in insertion order; only then are
    /// containers searched recursively, left to right. Matching is exact and
    /// case-sensitive.
    pub fn resolve(&self, name: &str) -> Option<NodeRef> {
        self.views.resolve(name)
    }

    /// Find a view anywhere in the tree by identity.
    pub fn find_by_id(&self, id: Uuid) -> Option<NodeRef> {
        self.views.find_by_id(id)
    }

    /// Create a top-level view and append it after the existing ones.
    ///
    /// Nothing is appended if the permission check, construction, or the
    /// sibling name check fails.
    #[instrument(level = "debug", skip(self), fields(tree = %self.name))]
    pub fn create_node(&self, request: &NodeRequest) -> ApplicationResult<NodeRef> {
        self.deps.permissions.check(Permission::CreateView)?;
        let node = Arc::new(self.deps.factory.construct(request, self)?);
        self.views.push(Arc::clone(&node))?;
        info!("created view '{}'", node.name());
        self.save()?;
        Ok(node)
    }

    /// Create a view inside `parent`, which must be a container of this tree.
    #[instrument(level = "debug", skip(self, parent), fields(tree = %self.name, parent = %parent.name()))]
    pub fn create_node_in(
        &self,
        parent: &ViewNode,
        request: &NodeRequest,
    ) -> ApplicationResult<NodeRef> {
        self.deps.permissions.check(Permission::CreateView)?;
        let children = parent
            .children()
            .ok_or_else(|| DomainError::NotAContainer(parent.name()))?;
        if self.find_by_id(parent.id()).is_none() {
            return Err(DomainError::ForeignNode(parent.name()).into());
        }
        let node = Arc::new(self.deps.factory.construct(request, self)?);
        children.push(Arc::clone(&node))?;
        info!("created view '{}' in '{}'", node.name(), parent.name());
        self.save()?;
        Ok(node)
    }

    /// Any view may be deleted by its owner.
    pub fn can_delete(&self, _node: &ViewNode) -> bool {
        true
    }

    /// Remove a top-level view.
    ///
    /// Views nested deeper are not touched: absent at top level means `false`,
    /// not an error, and nothing is persisted.
    #[instrument(level = "debug", skip(self, node), fields(tree = %self.name, view = %node.name()))]
    pub fn delete_node(&self, node: &ViewNode) -> ApplicationResult<bool> {
        if self.views.remove(node.id()).is_none() {
            debug!("not a top-level view, nothing to delete");
            return Ok(false);
        }
        info!("deleted view '{}'", node.name());
        self.save()?;
        Ok(true)
    }

    /// Remove a direct child of `parent`, with the same leniency as `delete_node`.
    #[instrument(level = "debug", skip(self, parent, node), fields(parent = %parent.name(), view = %node.name()))]
    pub fn delete_nested(&self, parent: &ViewNode, node: &ViewNode) -> ApplicationResult<bool> {
        if self.find_by_id(parent.id()).is_none() || !parent.delete_child(node) {
            debug!("not a child of the given view, nothing to delete");
            return Ok(false);
        }
        info!("deleted view '{}' from '{}'", node.name(), parent.name());
        self.save()?;
        Ok(true)
    }

    /// Rename a view of this tree, keeping names unique among its siblings.
    ///
    /// Returns false when the name is unchanged.
    #[instrument(level = "debug", skip(self, node), fields(view = %node.name()))]
    pub fn rename_node(&self, node: &ViewNode, new_name: &str) -> ApplicationResult<bool> {
        self.deps.permissions.check(Permission::ConfigureView)?;
        let new_name = validate_name(new_name)?;
        match self.views.rename(node.id(), new_name)? {
            None => Err(DomainError::ForeignNode(node.name()).into()),
            Some(old) if old == new_name => Ok(false),
            Some(old) => {
                info!("renamed view '{}' to '{}'", old, new_name);
                self.save()?;
                Ok(true)
            }
        }
    }

    /// Apply a rename that happened elsewhere.
    ///
    /// Unknown views and unknown item names are ignored (`false`), as is an
    /// item rename onto another tracked name. New item names are checked and
    /// trimmed like view names.
    #[instrument(level = "debug", skip(self))]
    pub fn on_rename(&self, event: RenameEvent) -> ApplicationResult<bool> {
        match event {
            RenameEvent::View {
                id,
                old_name,
                new_name,
            } => {
                let Some(node) = self.find_by_id(id) else {
                    debug!("rename of unknown view '{}' ignored", old_name);
                    return Ok(false);
                };
                self.rename_node(&node, &new_name)
            }
            RenameEvent::Item { old_name, new_name } => {
                let new_name = validate_name(&new_name)?;
                if !self.job_names.rename(&old_name, new_name) {
                    debug!("rename of item '{}' to '{}' ignored", old_name, new_name);
                    return Ok(false);
                }
                info!("tracked item '{}' renamed to '{}'", old_name, new_name);
                self.save()?;
                Ok(true)
            }
        }
    }

    /// Create an item through the owning collection, if it accepts changes.
    ///
    /// A read-only collection yields `None` without side effects.
    #[instrument(level = "debug", skip(self), fields(tree = %self.name))]
    pub fn create_item(&self, request: &ItemRequest) -> ApplicationResult<Option<Item>> {
        let group = match &self.deps.owner {
            OwningCollection::Modifiable(group) => group,
            OwningCollection::ReadOnly(_) => {
                debug!("owning collection is read-only");
                return Ok(None);
            }
        };
        let item = group
            .create_item(request)
            .map_err(|e| ApplicationError::collaborator(format!("create item {}", request.name), e))?;
        if let Some(item) = &item {
            self.job_names.add(item.name.clone());
            info!("created item '{}'", item.name);
            self.save()?;
        }
        Ok(item)
    }

    /// All items of the owning collection, as a fresh copy on every call.
    pub fn list_items(&self) -> ApplicationResult<Vec<Item>> {
        let _guard = self.items_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.deps
            .owner
            .items()
            .map_err(|e| ApplicationError::collaborator("list items", e))
    }

    /// Every item counts as contained: this view passes the whole owning
    /// collection through instead of filtering it.
    pub fn contains_item(&self, _item: &Item) -> bool {
        true
    }

    /// Views in depth-first order, parents before children.
    pub fn rows(&self) -> RowIter {
        RowIter::new(&self.views)
    }

    /// Persisted shape of the current tree.
    pub fn state(&self) -> TreeState {
        TreeState {
            name: self.name.clone(),
            job_names: self.job_names.names(),
            views: self.views().iter().map(|n| n.to_state()).collect(),
        }
    }

    fn save(&self) -> ApplicationResult<()> {
        let _guard = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.deps
            .persister
            .save(&self.state())
            .map_err(|e| ApplicationError::collaborator(format!("save tree {}", self.name), e))
    }
}

/// Pre-order walk over snapshots of the view lists.
pub struct RowIter {
    stack: Vec<Row>,
}

impl RowIter {
    fn new(views: &ChildList) -> Self {
        let stack = views
            .snapshot()
            .iter()
            .rev()
            .map(|node| Row {
                node: Arc::clone(node),
                depth: 0,
            })
            .collect();
        Self { stack }
    }
}

impl Iterator for RowIter {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.stack.pop()?;
        if let Some(children) = row.node.children() {
            // Push children in reverse order for left-to-right traversal
            for child in children.snapshot().iter().rev() {
                self.stack.push(Row {
                    node: Arc::clone(child),
                    depth: row.depth + 1,
                });
            }
        }
        Some(row)
    }
}
