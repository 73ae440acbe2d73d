//! Typed error definitions for renamer.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Library functions return `anyhow::Result`; callers recover these with
//! `err.downcast_ref::<RenameError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Incomplete format directive at end of template: {template:?}")]
    IncompleteFormat { template: String },

    #[error("Bad format character: %{0}")]
    BadFormatCharacter(char),

    #[error("Capture group {index} not present in match ({available} groups available)")]
    MissingCaptureGroup { index: usize, available: usize },

    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("{program} failed: {stderr}")]
    ExternalToolFailure { program: String, stderr: String },

    #[error("Refusing to overwrite existing file: {0}")]
    OverwriteAttempted(PathBuf),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
}

impl RenameError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u8 {
        match self {
            RenameError::IncompleteFormat { .. } => 10,
            RenameError::BadFormatCharacter(_) => 11,
            RenameError::MissingCaptureGroup { .. } => 12,
            RenameError::UnsupportedAlgorithm(_) => 20,
            RenameError::ExternalToolFailure { .. } => 30,
            RenameError::OverwriteAttempted(_) => 40,
            RenameError::DirectoryNotFound(_) => 41,
        }
    }

    /// Short machine-friendly kind, used as the `kind` field in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RenameError::IncompleteFormat { .. } => "incomplete_format",
            RenameError::BadFormatCharacter(_) => "bad_format_character",
            RenameError::MissingCaptureGroup { .. } => "missing_capture_group",
            RenameError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            RenameError::ExternalToolFailure { .. } => "external_tool_failure",
            RenameError::OverwriteAttempted(_) => "overwrite_attempted",
            RenameError::DirectoryNotFound(_) => "directory_not_found",
        }
    }
}
