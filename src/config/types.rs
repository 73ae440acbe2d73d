//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::checksum::Algorithm;
use crate::pipeline::Options;
use crate::sniff::{FALLBACK_EXT_DEFAULT, SNIFF_PROGRAM_DEFAULT, Sniffer};

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration threaded through the formatter and the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Digest used by the `%x` directive
    pub algorithm: Algorithm,
    /// Extension used when the sniffing program answers `???`
    pub fallback_ext: String,
    /// Program invoked by the `%g` directive
    pub sniff_program: String,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report the plan but do not touch the filesystem
    pub dry_run: bool,
    /// If true, print each change as `old -> new`
    pub report: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            fallback_ext: FALLBACK_EXT_DEFAULT.to_string(),
            sniff_program: SNIFF_PROGRAM_DEFAULT.to_string(),
            log_level: LogLevel::Normal,
            // paths::default_log_path() returns Result<PathBuf>; store Some(path) on success.
            log_file: paths::default_log_path().ok(),
            dry_run: false,
            report: true,
        }
    }
}

impl Config {
    /// Sniffer configured from this config.
    pub fn sniffer(&self) -> Sniffer {
        Sniffer::new(&self.sniff_program, &self.fallback_ext)
    }

    /// Pipeline run options from this config.
    pub fn options(&self) -> Options {
        Options {
            report: self.report,
            dry_run: self.dry_run,
        }
    }
}
