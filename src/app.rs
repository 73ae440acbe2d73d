//! Application orchestrator.
//! Loads/merges config, initializes logging, builds the pipeline from the
//! command-line stages, discovers files and runs the plan.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info};

use renamer::cli::Invocation;
use renamer::config::{create_template_config, load_config_from_xml};
use renamer::output as out;
use renamer::{Config, Formatter, RenameError, default_config_path, list_files};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(invocation: Invocation) -> Result<()> {
    let args = &invocation.args;

    // Config-file housekeeping happens before logging init.
    if args.print_config {
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("renamer config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file exists at that location.");
                } else {
                    out::print_info("No config file there yet. Run with --init-config to create a template.");
                }
            }
            Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
        }
        return Ok(());
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!("A template renamer config was written to: {}", path.display()));
        return Ok(());
    }

    // Defaults, then config file, then CLI flags (CLI wins).
    let mut cfg = Config::default();
    if let Some(settings) = load_config_from_xml()? {
        settings.apply_to(&mut cfg);
    }
    args.apply_overrides(&mut cfg)?;

    // Hold the guard until the end so buffered file logs are flushed.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!("Starting renamer: {:?}", args);

    let formatter = Arc::new(Formatter::new(cfg.clone()));
    let pipeline = invocation.pipeline(&formatter)?;
    if pipeline.is_empty() {
        out::print_warn("No stages given; only discriminators will be stripped.");
    }

    let files = list_files(&args.dirs).inspect_err(log_failure)?;
    info!(files = files.len(), stages = pipeline.len(), "discovered files");

    let changes = pipeline.run(files, cfg.options()).inspect_err(log_failure)?;

    if changes.is_empty() {
        info!("nothing to rename");
    } else if cfg.dry_run {
        info!(planned = changes.len(), "dry-run: nothing renamed");
    } else {
        info!(renamed = changes.len(), "run completed");
    }
    Ok(())
}

/// Log a failed run with structured fields for typed errors.
fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<RenameError>() {
        Some(re) => {
            let code = re.code();
            let kind = re.kind();
            match re {
                RenameError::OverwriteAttempted(path) => {
                    error!(code, kind, path = %path.display(), "Rename aborted: target appeared before the move")
                }
                RenameError::ExternalToolFailure { program, stderr } => {
                    error!(code, kind, %program, %stderr, "Rename aborted: type sniffing failed")
                }
                RenameError::DirectoryNotFound(path) => {
                    error!(code, kind, path = %path.display(), "Rename aborted: directory not found")
                }
                _ => error!(code, kind, error = %format!("{e:#}"), "Rename aborted"),
            }
        }
        None => error!(error = %format!("{e:#}"), "Rename aborted"),
    }
}
