//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Stage flags (`--set`, `--substitute`, `--replace`, `--format`) may be
//!   repeated and mixed; they run in the order they appear on the command line.
//! - --debug is a shorthand for --log-level debug.

use anyhow::{Context, Result};
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use crate::change::Key;
use crate::checksum::Algorithm;
use crate::config::types::{Config, LogLevel};
use crate::format::Formatter;
use crate::part::Part;
use crate::pipeline::Pipeline;
use crate::stages::{Format, Replace, Set, Stage, Substitute};

/// CLI wrapper for the renamer library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Plan and safely apply bulk file renames",
    after_help = "Stages run in command-line order. KEY is [old-|new-]PART, PART is one of \
                  path, parent, file, name, ext. Format templates understand %%, %0-%9, \
                  %e, %n, %g, %x and %t<c>."
)]
pub struct Args {
    /// Directories whose files (one level, no recursion) are renamed.
    #[arg(
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["print_config", "init_config"]
    )]
    pub dirs: Vec<PathBuf>,

    /// Unconditionally set PART of the proposed path to VALUE.
    #[arg(
        long,
        num_args = 2,
        value_names = ["PART", "VALUE"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub set: Vec<String>,

    /// When PATTERN matches the value at KEY, set that part to VALUE.
    #[arg(
        long,
        num_args = 3,
        value_names = ["KEY", "PATTERN", "VALUE"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub substitute: Vec<String>,

    /// Replace every PATTERN match in the value at KEY with VALUE ($1 back-references allowed).
    #[arg(
        long,
        num_args = 3,
        value_names = ["KEY", "PATTERN", "VALUE"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub replace: Vec<String>,

    /// When PATTERN matches the value at KEY, render TEMPLATE into that part.
    #[arg(
        long,
        num_args = 3,
        value_names = ["KEY", "PATTERN", "TEMPLATE"],
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub format: Vec<String>,

    /// Dry-run: report the plan but do not rename anything.
    #[arg(short = 'n', long, help = "Show what would be renamed, but do not touch any file")]
    pub dry_run: bool,

    /// Do not print `old -> new` lines.
    #[arg(short = 'q', long, help = "Do not print the old -> new report")]
    pub quiet: bool,

    /// Checksum algorithm for %x.
    #[arg(long, value_name = "NAME", help = "Checksum for %x: md2, md5, sha1, sha256, sha384, sha512")]
    pub algorithm: Option<String>,

    /// Extension used by %g when the file type is unknown.
    #[arg(long, value_name = "EXT")]
    pub fallback_ext: Option<String>,

    /// Program run as `<PROGRAM> --extension <path>` by %g.
    #[arg(long, value_name = "PROGRAM", value_hint = ValueHint::CommandName)]
    pub sniff_program: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where renamer will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by renamer and exit")]
    pub print_config: bool,

    /// Write a template config file at the default location, then exit.
    #[arg(long, help = "Write a template config file and exit")]
    pub init_config: bool,
}

/// One stage as written on the command line, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageSpec {
    Set { part: String, value: String },
    Substitute { key: String, pattern: String, value: String },
    Replace { key: String, pattern: String, value: String },
    Format { key: String, pattern: String, template: String },
}

impl StageSpec {
    /// Validate keys/patterns and build the stage.
    pub fn build(&self, formatter: &Arc<Formatter>) -> Result<Box<dyn Stage>> {
        Ok(match self {
            StageSpec::Set { part, value } => {
                Box::new(Set::always(parse_part(part)?, value.as_str()))
            }
            StageSpec::Substitute {
                key,
                pattern,
                value,
            } => Box::new(Substitute::new(parse_key(key)?, pattern, value.as_str())?),
            StageSpec::Replace {
                key,
                pattern,
                value,
            } => Box::new(Replace::new(parse_key(key)?, pattern, value.as_str())?),
            StageSpec::Format {
                key,
                pattern,
                template,
            } => Box::new(Format::new(
                parse_key(key)?,
                pattern,
                template.as_str(),
                Arc::clone(formatter),
            )?),
        })
    }

    fn from_values(id: &str, v: &[String]) -> Option<Self> {
        let spec = match (id, v) {
            ("set", [part, value]) => StageSpec::Set {
                part: part.clone(),
                value: value.clone(),
            },
            ("substitute", [key, pattern, value]) => StageSpec::Substitute {
                key: key.clone(),
                pattern: pattern.clone(),
                value: value.clone(),
            },
            ("replace", [key, pattern, value]) => StageSpec::Replace {
                key: key.clone(),
                pattern: pattern.clone(),
                value: value.clone(),
            },
            ("format", [key, pattern, template]) => StageSpec::Format {
                key: key.clone(),
                pattern: pattern.clone(),
                template: template.clone(),
            },
            _ => return None,
        };
        Some(spec)
    }
}

fn parse_part(s: &str) -> Result<Part> {
    s.parse::<Part>().map_err(anyhow::Error::msg)
}

fn parse_key(s: &str) -> Result<Key> {
    s.parse::<Key>().map_err(anyhow::Error::msg)
}

/// Parsed flags plus the stages in command-line order.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub args: Args,
    pub stages: Vec<StageSpec>,
}

impl Invocation {
    /// Build the pipeline for these stages.
    pub fn pipeline(&self, formatter: &Arc<Formatter>) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new();
        for (i, spec) in self.stages.iter().enumerate() {
            let stage = spec
                .build(formatter)
                .with_context(|| format!("stage {} ({spec:?})", i + 1))?;
            pipeline.push(stage);
        }
        Ok(pipeline)
    }
}

/// Collect stage flags with their command-line positions, then sort by position.
fn ordered_stages(matches: &ArgMatches) -> Vec<StageSpec> {
    const STAGE_ARGS: [(&str, usize); 4] = [("set", 2), ("substitute", 3), ("replace", 3), ("format", 3)];

    let mut found: Vec<(usize, StageSpec)> = Vec::new();
    for (id, arity) in STAGE_ARGS {
        let (Some(indices), Some(values)) =
            (matches.indices_of(id), matches.get_many::<String>(id))
        else {
            continue;
        };
        let indices: Vec<usize> = indices.collect();
        let values: Vec<String> = values.cloned().collect();
        for (idx, chunk) in indices.chunks(arity).zip(values.chunks(arity)) {
            if let Some(spec) = StageSpec::from_values(id, chunk) {
                found.push((idx[0], spec));
            }
        }
    }
    found.sort_by_key(|(idx, _)| *idx);
    found.into_iter().map(|(_, spec)| spec).collect()
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<()> {
        if let Some(name) = &self.algorithm {
            cfg.algorithm = name.parse::<Algorithm>()?;
        }
        if let Some(ext) = &self.fallback_ext {
            cfg.fallback_ext = ext.clone();
        }
        if let Some(prog) = &self.sniff_program {
            cfg.sniff_program = prog.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.quiet {
            cfg.report = false;
        }
        Ok(())
    }
}

/// Parse from an explicit argument list (used by tests).
pub fn parse_from<I, T>(itr: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Args::command().try_get_matches_from(itr)?;
    let args = Args::from_arg_matches(&matches)?;
    let stages = ordered_stages(&matches);
    Ok(Invocation { args, stages })
}

/// Parse the process arguments; exits with usage on error.
pub fn parse() -> Invocation {
    parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}
