use std::path::Path;

use regex::Regex;
use renamer::{Change, Key, Part, Replace, Set, Stage, Substitute, Value};

fn plan(stage: &dyn Stage, path: &str) -> Change {
    stage.apply(Change::new(path)).unwrap()
}

#[test]
fn set_always_writes_part() {
    let c = plan(&Set::always(Part::Ext, "txt"), "/d/notes.md");
    assert_eq!(c.proposed(), Path::new("/d/notes.txt"));
}

#[test]
fn set_when_predicate_rejects_leaves_change() {
    let stage = Set::when(|c: &Change| c.get(Key::original(Part::Ext)) == ".md", "/x/y.txt");
    assert_eq!(plan(&stage, "/d/a.md").proposed(), Path::new("/x/y.txt"));
    let c = plan(&stage, "/d/a.rs");
    assert!(c.is_noop());
}

#[test]
fn set_with_computed_value() {
    let stage = Set::always(
        Part::Name,
        Value::computed(|c: &Change| c.get(Key::original(Part::Name)).to_uppercase()),
    );
    assert_eq!(plan(&stage, "/d/readme.md").proposed(), Path::new("/d/README.md"));
}

#[test]
fn substitute_only_when_pattern_matches() {
    let stage = Substitute::new(Part::Ext, "png", "jpg").unwrap();
    assert_eq!(plan(&stage, "/d/img.png").proposed(), Path::new("/d/img.jpg"));
    assert!(plan(&stage, "/d/img.gif").is_noop());
}

#[test]
fn substitute_can_target_another_part() {
    let stage = Substitute::new(Key::original(Part::Ext), r"^\.jpe?g$", "photos")
        .unwrap()
        .into_part(Part::Parent);
    assert_eq!(plan(&stage, "/in/a.jpeg").proposed(), Path::new("photos/a.jpeg"));
}

#[test]
fn substitute_sees_discriminator_only_on_old_side() {
    let stage = Substitute::new(Key::original(Part::Name), r"\(\d+\)$", "dup").unwrap();
    assert_eq!(plan(&stage, "/d/x(4).txt").proposed(), Path::new("/d/dup.txt"));

    let stage = Substitute::new(Part::Name, r"\(\d+\)$", "dup").unwrap();
    assert_eq!(plan(&stage, "/d/x(4).txt").proposed(), Path::new("/d/x.txt"));
}

#[test]
fn replace_every_match() {
    let stage = Replace::new(Part::Name, "_", " ").unwrap();
    assert_eq!(
        plan(&stage, "/d/a_b_c.txt").proposed(),
        Path::new("/d/a b c.txt")
    );
}

#[test]
fn replace_on_ext() {
    let stage = Replace::new(Part::Ext, "md", "txt").unwrap();
    assert_eq!(plan(&stage, "notes.md").proposed(), Path::new("notes.txt"));
}

#[test]
fn replace_without_match_is_identity() {
    let stage = Replace::new(Part::Name, "zzz", "y").unwrap();
    let c = plan(&stage, "/d/abc.txt");
    assert_eq!(c, Change::new("/d/abc.txt"));
}

#[test]
fn replace_literal_expands_back_references() {
    let stage = Replace::new(Part::Name, r"(\d{4})-(\d{2})", "$2.$1").unwrap();
    assert_eq!(
        plan(&stage, "/d/report 2021-03.pdf").proposed(),
        Path::new("/d/report 03.2021.pdf")
    );
}

#[test]
fn replace_computed_is_inserted_verbatim() {
    let stage = Replace::with_regex(
        Part::Name,
        Regex::new("x").unwrap(),
        Value::computed(|_: &Change| "$1".to_string()),
    );
    assert_eq!(plan(&stage, "/d/axb").proposed(), Path::new("/d/a$1b"));
}

#[test]
fn closures_are_stages() {
    let stage = |c: Change| -> anyhow::Result<Change> { Ok(c.set(Part::Parent, "/moved")) };
    assert_eq!(plan(&stage, "/d/f.txt").proposed(), Path::new("/moved/f.txt"));
}

#[test]
fn bad_pattern_is_reported() {
    assert!(Substitute::new(Part::Name, "(", "x").is_err());
    assert!(Replace::new(Part::Name, "[", "x").is_err());
}
