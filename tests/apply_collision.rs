use std::fs;

use renamer::{Change, Options, Pipeline, apply, apply_change, list_files, run, with_discriminator};
use tempfile::tempdir;

#[test]
fn free_target_is_used_directly() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    fs::write(&src, "a").unwrap();
    let dest = dir.path().join("b.txt");

    let used = apply(&src, &dest).unwrap();
    assert_eq!(used, dest);
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "a");
}

#[test]
fn taken_target_gets_first_free_discriminator() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("photo.jpg"), "existing").unwrap();
    fs::write(d.join("photo(1).jpg"), "existing 1").unwrap();
    let src = d.join("incoming.jpg");
    fs::write(&src, "new").unwrap();

    let used = apply(&src, &d.join("photo.jpg")).unwrap();
    assert_eq!(used, d.join("photo(2).jpg"));
    assert_eq!(fs::read_to_string(d.join("photo.jpg")).unwrap(), "existing");
    assert_eq!(fs::read_to_string(d.join("photo(1).jpg")).unwrap(), "existing 1");
    assert_eq!(fs::read_to_string(d.join("photo(2).jpg")).unwrap(), "new");
}

#[test]
fn discriminator_goes_before_extension() {
    let dir = tempdir().unwrap();
    assert_eq!(
        with_discriminator(&dir.path().join("archive.tar.gz"), 3),
        dir.path().join("archive.tar(3).gz")
    );
    assert_eq!(
        with_discriminator(&dir.path().join("README"), 1),
        dir.path().join("README(1)")
    );
}

#[test]
fn two_sources_into_one_name_keep_both() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("a.jpg"), "A").unwrap();
    fs::write(d.join("b.jpg"), "B").unwrap();

    let first = apply_change(Change::with_proposal(d.join("a.jpg"), d.join("photo.jpg"))).unwrap();
    let second = apply_change(Change::with_proposal(d.join("b.jpg"), d.join("photo.jpg"))).unwrap();

    assert_eq!(first.proposed(), d.join("photo.jpg"));
    assert_eq!(second.proposed(), d.join("photo(1).jpg"));
    assert_eq!(second.original(), d.join("b.jpg"));
    assert_eq!(fs::read_to_string(d.join("photo.jpg")).unwrap(), "A");
    assert_eq!(fs::read_to_string(d.join("photo(1).jpg")).unwrap(), "B");
}

#[test]
fn missing_source_is_an_error_and_touches_nothing() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("out.txt");
    assert!(apply(&dir.path().join("ghost.txt"), &dest).is_err());
    assert!(!dest.exists());
}

#[cfg(unix)]
#[test]
fn dangling_symlink_occupies_its_name() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    std::os::unix::fs::symlink(d.join("nowhere"), d.join("link.txt")).unwrap();
    let src = d.join("src.txt");
    fs::write(&src, "s").unwrap();

    let used = apply(&src, &d.join("link.txt")).unwrap();
    assert_eq!(used, d.join("link(1).txt"));
    assert!(d.join("link.txt").symlink_metadata().unwrap().file_type().is_symlink());
}

#[test]
fn settled_duplicates_stay_put_across_runs() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("photo.jpg"), "base").unwrap();
    fs::write(d.join("photo(1).jpg"), "dup").unwrap();

    let quiet = Options {
        report: false,
        dry_run: false,
    };
    for _ in 0..3 {
        let done = run(list_files([d]).unwrap(), quiet, &Pipeline::new()).unwrap();
        assert!(done.is_empty(), "unexpected moves: {done:?}");
    }
    assert_eq!(fs::read_to_string(d.join("photo.jpg")).unwrap(), "base");
    assert_eq!(fs::read_to_string(d.join("photo(1).jpg")).unwrap(), "dup");
    assert!(!d.join("photo(2).jpg").exists());
}

#[test]
fn settled_source_is_returned_unchanged() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("a.txt"), "a").unwrap();
    fs::write(d.join("a(1).txt"), "a1").unwrap();

    let settled = apply_change(Change::new(d.join("a(1).txt"))).unwrap();
    assert!(settled.is_noop());
    assert_eq!(fs::read_to_string(d.join("a(1).txt")).unwrap(), "a1");
}
