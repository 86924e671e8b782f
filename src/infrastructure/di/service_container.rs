//! Service container for dependency injection
//!
//! Wires settings, the file store and the permission table into a tree.

use std::sync::Arc;

use tracing::debug;

use crate::application::{TreeDeps, ViewTree};
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::permissions::StaticPermissions;
use crate::infrastructure::store::TomlStore;
use crate::infrastructure::traits::{FileSystem, OwningCollection, RealFileSystem};

/// Container holding the store and the tree built on top of it.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Persister and owning item collection
    pub store: Arc<TomlStore>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> InfraResult<Self> {
        let settings = Arc::new(settings);
        let store = Arc::new(TomlStore::open(&settings.store_path, Arc::clone(&fs))?);

        Ok(Self { settings, fs, store })
    }

    /// Tree collaborators backed by the store and the configured permissions.
    pub fn tree_deps(&self) -> TreeDeps {
        TreeDeps::new(
            OwningCollection::Modifiable(self.store.clone()),
            Arc::new(StaticPermissions::new(self.settings.granted.iter().copied())),
            self.store.clone(),
        )
    }

    /// Restore the stored tree, or start an empty one named after the settings.
    pub fn open_tree(&self) -> ViewTree {
        match self.store.load_tree() {
            Some(state) => ViewTree::from_state(&state, self.tree_deps()),
            None => {
                debug!("open_tree: starting empty tree '{}'", self.settings.tree_name);
                ViewTree::new(self.settings.tree_name.clone(), self.tree_deps())
            }
        }
    }
}
