use std::fs;
use std::io;

use renamer::platform::rename_no_clobber;
use tempfile::tempdir;

#[test]
fn refuses_existing_destination() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    fs::write(&src, "new").unwrap();
    fs::write(&dst, "old").unwrap();

    let err = rename_no_clobber(&src, &dst).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
    assert_eq!(fs::read_to_string(&src).unwrap(), "new");
}

#[test]
fn moves_into_free_name() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dst = dir.path().join("dst");
    fs::write(&src, "data").unwrap();

    rename_no_clobber(&src, &dst).unwrap();
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dst).unwrap(), "data");
}
