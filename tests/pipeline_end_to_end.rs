use std::fs;
use std::path::Path;

use renamer::{Options, Part, Pipeline, Set, Substitute, list_files, run};
use tempfile::tempdir;

const QUIET: Options = Options {
    report: false,
    dry_run: false,
};

fn names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}

#[test]
fn discriminators_are_renumbered_after_ext_change() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("img(1).png"), "one").unwrap();
    fs::write(d.join("img(2).png"), "two").unwrap();

    let pipeline = Pipeline::new().then(Substitute::new(Part::Ext, "png", "jpg").unwrap());
    let files = list_files([d]).unwrap();
    let done = run(files, QUIET, &pipeline).unwrap();

    assert_eq!(done.len(), 2);
    assert_eq!(names(d), vec!["img(1).jpg", "img.jpg"]);
    assert_eq!(fs::read_to_string(d.join("img.jpg")).unwrap(), "one");
    assert_eq!(fs::read_to_string(d.join("img(1).jpg")).unwrap(), "two");
}

#[test]
fn colliding_proposals_first_keeps_base_name() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("a.jpg"), "A").unwrap();
    fs::write(d.join("b.jpg"), "B").unwrap();

    let pipeline = Pipeline::new().then(Set::always(Part::Name, "photo"));
    run(list_files([d]).unwrap(), QUIET, &pipeline).unwrap();

    assert_eq!(names(d), vec!["photo(1).jpg", "photo.jpg"]);
    assert_eq!(fs::read_to_string(d.join("photo.jpg")).unwrap(), "A");
    assert_eq!(fs::read_to_string(d.join("photo(1).jpg")).unwrap(), "B");
}

#[test]
fn dry_run_touches_nothing() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("a.jpg"), "A").unwrap();
    fs::write(d.join("b.jpg"), "B").unwrap();

    let pipeline = Pipeline::new().then(Set::always(Part::Name, "photo"));
    let plan = run(
        list_files([d]).unwrap(),
        Options {
            report: false,
            dry_run: true,
        },
        &pipeline,
    )
    .unwrap();

    assert_eq!(plan.len(), 2);
    assert!(plan.iter().all(|c| c.proposed() == d.join("photo.jpg")));
    assert_eq!(names(d), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn unchanged_files_are_dropped_from_plan() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("keep.txt"), "").unwrap();
    fs::write(d.join("dup(3).txt"), "").unwrap();

    let pipeline = Pipeline::new();
    let plan = pipeline.plan(list_files([d]).unwrap()).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].original(), d.join("dup(3).txt"));
    assert_eq!(plan[0].proposed(), d.join("dup.txt"));
}

#[test]
fn stage_error_aborts_before_any_move() {
    let dir = tempdir().unwrap();
    let d = dir.path();
    fs::write(d.join("a.txt"), "").unwrap();
    fs::write(d.join("b.txt"), "").unwrap();

    let pipeline = Pipeline::new()
        .then(Set::always(Part::Name, "renamed"))
        .then(|c: renamer::Change| -> anyhow::Result<renamer::Change> {
            if c.original().ends_with("b.txt") {
                anyhow::bail!("refusing b");
            }
            Ok(c)
        });
    assert!(run(list_files([d]).unwrap(), QUIET, &pipeline).is_err());
    assert_eq!(names(d), vec!["a.txt", "b.txt"]);
}

#[test]
fn flatten_keeps_order() {
    let groups = vec![vec!["b", "a"], vec![], vec!["c"]];
    let flat = renamer::flatten_paths(groups);
    assert_eq!(
        flat,
        vec![Path::new("b"), Path::new("a"), Path::new("c")]
    );
}
