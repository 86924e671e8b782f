//! Boundary traits for the collaborators a tree calls outward through
//!
//! These traits abstract permission checks, persistence, node construction,
//! the owning item collection and file I/O, allowing the tree to be tested
//! with mock implementations.

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::application::{ApplicationResult, CollaboratorError, ViewTree};
use crate::domain::{AccessDenied, Item, ItemRequest, NodeRequest, Permission, TreeState, ViewNode};

/// Decides whether the caller may perform an action.
pub trait PermissionCheck: Send + Sync {
    fn check(&self, permission: Permission) -> Result<(), AccessDenied>;
}

/// Writes the tree state somewhere durable. Assumed idempotent.
pub trait Persister: Send + Sync {
    fn save(&self, state: &TreeState) -> Result<(), CollaboratorError>;
}

/// Turns a request into a view. `parent` is the tree the view will join.
pub trait NodeFactory: Send + Sync {
    fn construct(&self, request: &NodeRequest, parent: &ViewTree) -> ApplicationResult<ViewNode>;
}

/// Collection owning the items views refer to.
pub trait ItemGroup: Send + Sync {
    /// Current items; each call returns a new vector.
    fn items(&self) -> Result<Vec<Item>, CollaboratorError>;
}

/// Item collection that accepts new items.
pub trait ModifiableItemGroup: ItemGroup {
    /// Create an item. `None` means the collection declined without error.
    fn create_item(&self, request: &ItemRequest) -> Result<Option<Item>, CollaboratorError>;
}

/// Owning collection together with its capability.
#[derive(Clone)]
pub enum OwningCollection {
    ReadOnly(Arc<dyn ItemGroup>),
    Modifiable(Arc<dyn ModifiableItemGroup>),
}

impl OwningCollection {
    pub fn items(&self) -> Result<Vec<Item>, CollaboratorError> {
        match self {
            OwningCollection::ReadOnly(group) => group.items(),
            OwningCollection::Modifiable(group) => group.items(),
        }
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self, OwningCollection::Modifiable(_))
    }
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
