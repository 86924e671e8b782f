mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use viewtree::application::{CollaboratorError, ViewTree};
use viewtree::domain::{ItemRequest, NodeRequest, TreeState};
use viewtree::infrastructure::traits::{OwningCollection, Persister};
use viewtree::infrastructure::StaticPermissions;

use common::{deps_with, fixture, MemoryItems};

/// Holds the first save until released; records every saved state.
struct GatedPersister {
    first: AtomicBool,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    last: Mutex<Option<TreeState>>,
}

impl Persister for GatedPersister {
    fn save(&self, state: &TreeState) -> Result<(), CollaboratorError> {
        if !self.first.swap(true, Ordering::SeqCst) {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        *self.last.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

#[test]
fn given_reader_enumerating_when_writer_appends_and_removes_then_snapshots_stay_consistent() {
    let f = Arc::new(fixture());
    f.tree.create_node(&NodeRequest::leaf("anchor")).unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let f = Arc::clone(&f);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut passes = 0usize;
            while !done.load(Ordering::SeqCst) {
                let snapshot = f.tree.views();
                let first_pass: Vec<_> = snapshot.iter().map(|n| n.id()).collect();
                let second_pass: Vec<_> = snapshot.iter().map(|n| n.id()).collect();
                assert_eq!(first_pass, second_pass);
                assert_eq!(snapshot[0].name(), "anchor");
                assert!(f.tree.resolve("anchor").is_some());
                passes += 1;
            }
            passes
        })
    };

    for i in 0..200 {
        let node = f
            .tree
            .create_node(&NodeRequest::leaf(format!("v{i}")))
            .unwrap();
        if i % 2 == 0 {
            assert!(f.tree.delete_node(&node).unwrap());
        }
    }
    done.store(true, Ordering::SeqCst);

    let passes = reader.join().unwrap();
    assert!(passes > 0);
    assert_eq!(f.tree.views().len(), 101);
}

#[test]
fn given_parallel_item_creation_when_names_collide_by_case_then_single_entry() {
    let f = Arc::new(fixture());

    let handles: Vec<_> = ["job", "JOB", "Job", "jOb"]
        .into_iter()
        .map(|name| {
            let f = Arc::clone(&f);
            thread::spawn(move || {
                f.tree.create_item(&ItemRequest::new(name)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(f.tree.job_names().len(), 1);
    assert_eq!(f.persister.saves(), 4);
}

#[test]
fn given_parallel_creators_when_same_name_then_exactly_one_wins() {
    let f = Arc::new(fixture());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let f = Arc::clone(&f);
            thread::spawn(move || f.tree.create_node(&NodeRequest::leaf("ops")).is_ok())
        })
        .collect();
    let wins = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(wins, 1);
    assert_eq!(f.tree.views().len(), 1);
}

#[test]
fn given_slow_first_save_when_second_create_lands_then_last_save_has_both_views() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let persister = Arc::new(GatedPersister {
        first: AtomicBool::new(false),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        last: Mutex::new(None),
    });
    let tree = Arc::new(ViewTree::new(
        "T",
        deps_with(
            OwningCollection::ReadOnly(Arc::new(MemoryItems::default())),
            Arc::new(StaticPermissions::allow_all()),
            persister.clone(),
        ),
    ));

    let first = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || tree.create_node(&NodeRequest::leaf("a")).unwrap())
    };
    entered_rx.recv().unwrap();

    let second = {
        let tree = Arc::clone(&tree);
        thread::spawn(move || tree.create_node(&NodeRequest::leaf("b")).unwrap())
    };
    while tree.views().len() < 2 {
        thread::sleep(Duration::from_millis(1));
    }
    // give the second save a chance to overtake the held one
    thread::sleep(Duration::from_millis(50));
    release_tx.send(()).unwrap();
    first.join().unwrap();
    second.join().unwrap();

    let live: Vec<String> = tree.views().iter().map(|n| n.name()).collect();
    let persisted: Vec<String> = persister
        .last
        .lock()
        .unwrap()
        .as_ref()
        .unwrap()
        .views
        .iter()
        .map(|v| v.name.clone())
        .collect();
    assert_eq!(live, vec!["a", "b"]);
    assert_eq!(persisted, live);
}
