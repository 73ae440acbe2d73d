use std::path::PathBuf;
use std::sync::Arc;

use renamer::cli::{StageSpec, parse_from};
use renamer::{Algorithm, Config, Formatter, LogLevel};

#[test]
fn stages_keep_command_line_order() {
    let inv = parse_from([
        "renamer",
        "--replace",
        "name",
        "_",
        " ",
        "--set",
        "ext",
        "txt",
        "--replace",
        "name",
        "-",
        "",
        "in",
    ])
    .unwrap();

    assert_eq!(inv.args.dirs, vec![PathBuf::from("in")]);
    assert_eq!(
        inv.stages,
        vec![
            StageSpec::Replace {
                key: "name".into(),
                pattern: "_".into(),
                value: " ".into()
            },
            StageSpec::Set {
                part: "ext".into(),
                value: "txt".into()
            },
            StageSpec::Replace {
                key: "name".into(),
                pattern: "-".into(),
                value: "".into()
            },
        ]
    );
}

#[test]
fn dirs_are_required_for_a_run() {
    assert!(parse_from(["renamer", "--set", "ext", "txt"]).is_err());
    assert!(parse_from(["renamer", "--print-config"]).is_ok());
}

#[test]
fn wrong_arity_is_rejected() {
    assert!(parse_from(["renamer", "--substitute", "ext", "png"]).is_err());
}

#[test]
fn bad_key_fails_when_building_pipeline() {
    let inv = parse_from(["renamer", "--set", "colour", "red", "dir"]).unwrap();
    let formatter = Arc::new(Formatter::new(Config::default()));
    assert!(inv.pipeline(&formatter).is_err());

    let inv = parse_from(["renamer", "--format", "old-name", "(", "%1", "dir"]).unwrap();
    assert!(inv.pipeline(&formatter).is_err());
}

#[test]
fn overrides_apply_on_top_of_config() {
    let inv = parse_from([
        "renamer",
        "-n",
        "-q",
        "--debug",
        "--algorithm",
        "SHA-1",
        "--fallback-ext",
        "bin",
        "--sniff-program",
        "/opt/file",
        "dir",
    ])
    .unwrap();
    let mut cfg = Config::default();
    inv.args.apply_overrides(&mut cfg).unwrap();
    assert!(cfg.dry_run);
    assert!(!cfg.report);
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.algorithm, Algorithm::Sha1);
    assert_eq!(cfg.fallback_ext, "bin");
    assert_eq!(cfg.sniff_program, "/opt/file");
}

#[test]
fn unsupported_algorithm_override_fails() {
    let inv = parse_from(["renamer", "--algorithm", "crc32", "dir"]).unwrap();
    let mut cfg = Config::default();
    assert!(inv.args.apply_overrides(&mut cfg).is_err());
}
