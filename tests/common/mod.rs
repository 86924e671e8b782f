#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use viewtree::application::{CollaboratorError, TreeDeps, ViewTree};
use viewtree::domain::{AccessDenied, Item, ItemRequest, Permission, TreeState};
use viewtree::infrastructure::traits::{
    ItemGroup, ModifiableItemGroup, OwningCollection, PermissionCheck, Persister,
};
use viewtree::infrastructure::StaticPermissions;

/// Counts saves and keeps the last saved state.
#[derive(Default)]
pub struct CountingPersister {
    saves: AtomicUsize,
    last: Mutex<Option<TreeState>>,
}

impl CountingPersister {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<TreeState> {
        self.last.lock().unwrap().clone()
    }
}

impl Persister for CountingPersister {
    fn save(&self, state: &TreeState) -> Result<(), CollaboratorError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

pub struct FailingPersister;

impl Persister for FailingPersister {
    fn save(&self, _state: &TreeState) -> Result<(), CollaboratorError> {
        Err("disk full".into())
    }
}

pub struct DenyAll;

impl PermissionCheck for DenyAll {
    fn check(&self, permission: Permission) -> Result<(), AccessDenied> {
        Err(AccessDenied {
            permission,
            reason: "denied by test".into(),
        })
    }
}

/// In-memory item collection; modifiable or not depending on how it is wrapped.
#[derive(Default)]
pub struct MemoryItems {
    items: Mutex<Vec<Item>>,
}

impl MemoryItems {
    pub fn with_items(names: &[&str]) -> Self {
        Self {
            items: Mutex::new(names.iter().map(|n| Item::new(*n)).collect()),
        }
    }

    pub fn push(&self, name: &str) {
        self.items.lock().unwrap().push(Item::new(name));
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

impl ItemGroup for MemoryItems {
    fn items(&self) -> Result<Vec<Item>, CollaboratorError> {
        Ok(self.items.lock().unwrap().clone())
    }
}

impl ModifiableItemGroup for MemoryItems {
    fn create_item(&self, request: &ItemRequest) -> Result<Option<Item>, CollaboratorError> {
        let item = Item::new(request.name.clone());
        self.items.lock().unwrap().push(item.clone());
        Ok(Some(item))
    }
}

pub struct FailingItems;

impl ItemGroup for FailingItems {
    fn items(&self) -> Result<Vec<Item>, CollaboratorError> {
        Err("collection unavailable".into())
    }
}

impl ModifiableItemGroup for FailingItems {
    fn create_item(&self, _request: &ItemRequest) -> Result<Option<Item>, CollaboratorError> {
        Err("collection unavailable".into())
    }
}

/// Tree over a modifiable in-memory collection with every permission granted.
pub struct Fixture {
    pub tree: ViewTree,
    pub persister: Arc<CountingPersister>,
    pub items: Arc<MemoryItems>,
}

pub fn fixture() -> Fixture {
    let persister = Arc::new(CountingPersister::default());
    let items = Arc::new(MemoryItems::default());
    let deps = TreeDeps::new(
        OwningCollection::Modifiable(items.clone()),
        Arc::new(StaticPermissions::allow_all()),
        persister.clone(),
    );
    Fixture {
        tree: ViewTree::new("T", deps),
        persister,
        items,
    }
}

pub fn deps_with(
    owner: OwningCollection,
    permissions: Arc<dyn PermissionCheck>,
    persister: Arc<dyn Persister>,
) -> TreeDeps {
    TreeDeps::new(owner, permissions, persister)
}
