use std::path::Path;

use renamer::{Change, Key, Part, Pipeline, Replace, Set, Stage, Substitute};

#[test]
fn no_stage_touches_the_original() {
    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(Set::always(Part::Name, "x")),
        Box::new(Substitute::new(Key::original(Part::Ext), r"\.txt$", "md").unwrap()),
        Box::new(Replace::new(Key::original(Part::Parent), "in", "out").unwrap()),
        Box::new(Set::when(|_: &Change| true, "/elsewhere/whole.bin")),
    ];

    let mut change = Change::new("/in/file(2).txt");
    for stage in &stages {
        change = stage.apply(change).unwrap();
        assert_eq!(change.original(), Path::new("/in/file(2).txt"));
    }
    assert_eq!(change.proposed(), Path::new("/elsewhere/whole.bin"));
}

#[test]
fn writes_through_old_keys_land_on_new() {
    let c = Change::with_proposal("/a/Old.TXT", "/b/new.md");
    let c = c.update(Key::original(Part::Ext), |e| e.to_lowercase());
    assert_eq!(c.proposed(), Path::new("/b/new.txt"));
    assert_eq!(c.get(Key::original(Part::Ext)), ".TXT");
    assert_eq!(c.get(Part::Ext), ".txt");
}

#[test]
fn later_stages_see_earlier_results() {
    let pipeline = Pipeline::new()
        .then(Set::always(Part::Name, "draft"))
        .then(Replace::new(Part::Name, "draft", "final").unwrap());
    let c = pipeline.plan_one(Path::new("/d/notes.md")).unwrap();
    assert_eq!(c.proposed(), Path::new("/d/final.md"));
}
