//! File-type sniffing through an external program.
//!
//! Runs `<program> --extension <path>` (the `file` utility by default) and
//! turns its one-line answer `path: jpeg/jpg/jpe` into an extension.
//! - `(null)` means the program knows the type but has no extension: empty.
//! - `???` means the type is unknown: the configured fallback.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::errors::RenameError;
use crate::part::normalize_ext;

pub const SNIFF_PROGRAM_DEFAULT: &str = "file";
pub const FALLBACK_EXT_DEFAULT: &str = ".mp4";

/// External type-sniffing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sniffer {
    pub program: String,
    pub fallback_ext: String,
}

impl Default for Sniffer {
    fn default() -> Self {
        Self {
            program: SNIFF_PROGRAM_DEFAULT.to_string(),
            fallback_ext: FALLBACK_EXT_DEFAULT.to_string(),
        }
    }
}

impl Sniffer {
    pub fn new(program: impl Into<String>, fallback_ext: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            fallback_ext: fallback_ext.into(),
        }
    }

    /// Guess the extension of `path`, with leading dot or empty.
    pub fn guess_extension(&self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--extension")
            .arg(path)
            .output()
            .with_context(|| format!("spawn '{}' for {}", self.program, path.display()))?;

        if !output.status.success() {
            return Err(RenameError::ExternalToolFailure {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let ext = parse_response(&stdout, path, &self.fallback_ext);
        debug!(path = %path.display(), response = %stdout.trim(), ext = %ext, "sniffed extension");
        Ok(ext)
    }
}

/// Parse `path: g1/g2/...` into `.g1`.
fn parse_response(stdout: &str, path: &Path, fallback_ext: &str) -> String {
    let line = stdout.lines().next().unwrap_or("").trim();
    let prefix = format!("{}:", path.display());
    let guesses = match line.strip_prefix(&prefix) {
        Some(rest) => rest,
        None => line.rsplit_once(": ").map(|(_, g)| g).unwrap_or(line),
    }
    .trim();

    let first = guesses.split('/').next().unwrap_or("").trim();
    match first {
        "" | "(null)" => String::new(),
        "???" => normalize_ext(fallback_ext),
        guess => normalize_ext(guess),
    }
}
