//! End-to-end tests against a real inotify channel.
//!
//! Events are provoked before `listen` is called; the kernel queues them on
//! the channel, so the single-threaded loop has work waiting and the
//! stopping observer keeps the tests from blocking.

use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;

use dirwatch::{DispatchOutcome, Event, EventMask, WatchConfig, Watcher, WatcherState};
use tempfile::TempDir;

fn stop_and_collect(watcher: &mut Watcher) -> Rc<RefCell<Vec<Event>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    watcher.connect_observer(move |event| {
        sink.borrow_mut().push(event.clone());
        DispatchOutcome::Stop
    });
    seen
}

#[test]
fn test_create_event_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut watcher = Watcher::open().unwrap();
    watcher
        .add_watch(dir.path(), EventMask::CREATE | EventMask::DELETE)
        .unwrap();
    let seen = stop_and_collect(&mut watcher);

    File::create(dir.path().join("a.txt")).unwrap();

    watcher.listen().unwrap();
    assert_eq!(watcher.state(), WatcherState::Stopped);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, dir.path().join("a.txt"));
    assert!(seen[0].mask.contains(EventMask::CREATE));
    assert!(!seen[0].is_directory());
}

#[test]
fn test_watch_tree_covers_subdirectories() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let mut watcher = Watcher::open().unwrap();
    let descriptors = watcher.watch_tree(dir.path(), EventMask::CREATE).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(watcher.watch_count(), 2);

    let seen = stop_and_collect(&mut watcher);
    File::create(dir.path().join("sub").join("nested.txt")).unwrap();

    watcher.listen().unwrap();
    let seen = seen.borrow();
    assert_eq!(seen[0].path, dir.path().join("sub").join("nested.txt"));
}

#[test]
fn test_watch_tree_honors_max_depth() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("sub").join("deeper")).unwrap();

    let config = WatchConfig::new().with_max_depth(1);
    let mut watcher = Watcher::with_config(config).unwrap();
    let descriptors = watcher.watch_tree(dir.path(), EventMask::CREATE).unwrap();

    // The root and its direct child, but not the grandchild.
    assert_eq!(descriptors.len(), 2);
}

#[test]
fn test_add_watch_missing_path_leaves_watcher_armed() {
    let mut watcher = Watcher::open().unwrap();
    let err = watcher
        .add_watch("/nonexistent/dirwatch/e2e", EventMask::CREATE)
        .unwrap_err();

    assert_eq!(err.errno(), Some(libc::ENOENT));
    assert_eq!(watcher.state(), WatcherState::Armed);
    assert_eq!(watcher.watch_count(), 0);
}

#[test]
fn test_re_adding_a_path_reuses_its_descriptor() {
    let dir = TempDir::new().unwrap();
    let mut watcher = Watcher::open().unwrap();

    let first = watcher.add_watch(dir.path(), EventMask::CREATE).unwrap();
    let second = watcher
        .add_watch(dir.path(), EventMask::CREATE | EventMask::DELETE)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(watcher.watch_count(), 1);
}

#[test]
fn test_default_mask_watch_sees_modifications() {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("log.txt");
    File::create(&file_path).unwrap();

    let mut watcher = Watcher::open().unwrap();
    watcher.watch(&file_path).unwrap();

    let seen = stop_and_collect(&mut watcher);
    std::fs::write(&file_path, b"changed").unwrap();

    watcher.listen().unwrap();
    let seen = seen.borrow();
    assert!(!seen.is_empty());
    assert_eq!(seen[0].path, file_path);
}
