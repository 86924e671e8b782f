//! TOML file store: persists the tree and owns the items views refer to.
//!
//! Document layout:
//! ```toml
//! [[items]]
//! name = "job1"
//!
//! [tree]
//! name = "main"
//! job_names = ["job1"]
//! [[tree.views]]
//! id = "..."
//! name = "ops"
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, CollaboratorError};
use crate::domain::{validate_name, Item, ItemRequest, NameSet, TreeState};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{FileSystem, ItemGroup, ModifiableItemGroup, Persister};

/// On-disk document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreDocument {
    pub items: Vec<Item>,
    pub tree: Option<TreeState>,
}

/// File-backed persister and modifiable item collection.
///
/// The whole document is held in memory and rewritten on every change.
pub struct TomlStore {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
    doc: Mutex<StoreDocument>,
}

impl TomlStore {
    /// Open the store at `path`; a missing file is an empty store.
    #[instrument(level = "debug", skip(fs))]
    pub fn open(path: &Path, fs: Arc<dyn FileSystem>) -> InfraResult<Self> {
        let doc = if fs.exists(path) {
            let content = fs
                .read_to_string(path)
                .map_err(|e| InfraError::io(format!("read store {}", path.display()), e))?;
            toml::from_str(&content)
                .map_err(|e| InfraError::format(path.display().to_string(), e))?
        } else {
            debug!("open: no store yet at {}", path.display());
            StoreDocument::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            fs,
            doc: Mutex::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tree state from the last save, if any.
    pub fn load_tree(&self) -> Option<TreeState> {
        self.lock().tree.clone()
    }

    /// Rename an item in place. Returns false if no item has `old` as name.
    #[instrument(level = "debug", skip(self))]
    pub fn rename_item(&self, old: &str, new: &str) -> InfraResult<bool> {
        let new = validate_name(new).map_err(ApplicationError::from)?;
        let mut doc = self.lock();
        let Some(pos) = doc.items.iter().position(|i| i.name == old) else {
            return Ok(false);
        };
        let others = NameSet::from_names(
            doc.items
                .iter()
                .filter(|i| i.name != old)
                .map(|i| i.name.clone()),
        );
        if others.contains(new) {
            return Err(InfraError::ItemExists(new.to_string()));
        }
        doc.items[pos].name = new.to_string();
        if let Err(e) = self.write(&doc) {
            doc.items[pos].name = old.to_string();
            return Err(e);
        }
        Ok(true)
    }

    fn lock(&self) -> MutexGuard<'_, StoreDocument> {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, doc: &StoreDocument) -> InfraResult<()> {
        let content = toml::to_string_pretty(doc)
            .map_err(|e| InfraError::format(self.path.display().to_string(), e))?;
        self.fs
            .ensure_parent(&self.path)
            .map_err(|e| InfraError::io(format!("create parent of {}", self.path.display()), e))?;
        self.fs
            .write(&self.path, &content)
            .map_err(|e| InfraError::io(format!("write store {}", self.path.display()), e))
    }
}

impl Persister for TomlStore {
    #[instrument(level = "debug", skip(self, state), fields(path = %self.path.display()))]
    fn save(&self, state: &TreeState) -> Result<(), CollaboratorError> {
        let mut doc = self.lock();
        let previous = doc.tree.replace(state.clone());
        if let Err(e) = self.write(&doc) {
            doc.tree = previous;
            return Err(Box::new(e));
        }
        Ok(())
    }
}

impl ItemGroup for TomlStore {
    fn items(&self) -> Result<Vec<Item>, CollaboratorError> {
        Ok(self.lock().items.clone())
    }
}

impl ModifiableItemGroup for TomlStore {
    #[instrument(level = "debug", skip(self))]
    fn create_item(&self, request: &ItemRequest) -> Result<Option<Item>, CollaboratorError> {
        let name = validate_name(&request.name)?;
        let mut doc = self.lock();
        let existing = NameSet::from_names(doc.items.iter().map(|i| i.name.clone()));
        if existing.contains(name) {
            return Err(Box::new(InfraError::ItemExists(name.to_string())));
        }
        let item = Item::new(name);
        doc.items.push(item.clone());
        if let Err(e) = self.write(&doc) {
            doc.items.pop();
            return Err(Box::new(e));
        }
        Ok(Some(item))
    }
}
