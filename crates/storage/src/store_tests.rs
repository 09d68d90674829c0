// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pyhost_core::ExecMode;
use tempfile::TempDir;

fn store(dir: &TempDir) -> ArtifactStore {
    ArtifactStore::new(ArtifactLayout::new(dir.path(), ExecMode::Persistent, "py"))
}

#[test]
fn resolve_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let resolved = store.resolve("42", "hello.py").unwrap();

    assert_eq!(resolved.dir, dir.path().join("42").join("hello"));
    assert_eq!(resolved.file_name, "hello.py");
    assert!(!dir.path().join("42").exists());
}

#[test]
fn save_creates_directory_tree_and_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let target = dir.path().join("42").join("hello");

    let path = store.save(&target, "hello.py", b"print('hi')").unwrap();
    store.save(&target, "hello.py", b"print('again')").unwrap();

    assert_eq!(path, target.join("hello.py"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('again')");
    assert!(store.exists(&path));
}

#[test]
fn save_rejects_nested_relative_names() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let err = store.save(dir.path(), "../escape.py", b"x").unwrap_err();
    assert!(matches!(err, StoreError::Name(_)));
    assert!(!dir.path().join("escape.py").exists());
}

#[test]
fn save_reports_write_failure() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    // A regular file where a directory is needed
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();

    let err = store.save(&blocker.join("sub"), "a.py", b"x").unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }), "got {:?}", err);
}

#[test]
fn create_dir_is_idempotent_and_reports_blockers() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let libs = dir.path().join("42").join("job").join("libs");

    store.create_dir(&libs).unwrap();
    store.create_dir(&libs).unwrap();
    assert!(libs.is_dir());

    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "file").unwrap();
    let err = store.create_dir(&blocker.join("libs")).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }), "got {:?}", err);
}

#[test]
fn remove_tree_deletes_recursively_and_tolerates_missing() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let target = dir.path().join("42").join("session-s1");
    store.save(&target.join("libs"), "pkg.py", b"x").unwrap();

    store.remove_tree(&target);
    assert!(!target.exists());

    // Second removal is a no-op
    store.remove_tree(&target);
}

#[test]
fn list_returns_sorted_script_dirs_without_sessions() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    let root = dir.path().join("42");
    for name in ["zeta", "alpha", "session-tok1"] {
        std::fs::create_dir_all(root.join(name)).unwrap();
    }
    std::fs::write(root.join("stray.txt"), "x").unwrap();

    assert_eq!(store.list("42").unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn list_for_unknown_identity_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(store(&dir).list("nobody").unwrap().is_empty());
}

#[test]
fn list_rejects_path_like_identity() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        store(&dir).list("../etc"),
        Err(StoreError::Name(NameError::Identity(_)))
    ));
}
