use std::fs;

use renamer::{RenameError, list_files};
use tempfile::tempdir;

#[test]
fn lists_files_one_level_sorted() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("b.txt"), "").unwrap();
    fs::write(d.join("a.txt"), "").unwrap();
    fs::create_dir(d.join("sub")).unwrap();
    fs::write(d.join("sub").join("deep.txt"), "").unwrap();

    let files = list_files([d]).unwrap();
    assert_eq!(files, vec![d.join("a.txt"), d.join("b.txt")]);
}

#[test]
fn several_directories_are_merged() {
    let one = tempdir().unwrap();
    let two = tempdir().unwrap();
    fs::write(one.path().join("x"), "").unwrap();
    fs::write(two.path().join("y"), "").unwrap();

    let files = list_files([one.path(), two.path()]).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.contains(&one.path().join("x")));
    assert!(files.contains(&two.path().join("y")));
}

#[test]
fn missing_directory_is_typed_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = list_files([&missing]).unwrap_err();
    match err.downcast_ref::<RenameError>() {
        Some(RenameError::DirectoryNotFound(p)) => assert_eq!(p, &missing),
        other => panic!("unexpected: {other:?}"),
    }
}
