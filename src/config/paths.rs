//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.
//!
//! `RENAMER_CONFIG` overrides the config path; the log file then sits next to it.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "RENAMER_CONFIG";

/// OS-appropriate default config path, or `$RENAMER_CONFIG` when set.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        let p = if p.is_relative() {
            env::current_dir()?.join(p)
        } else {
            p
        };
        // A directory means "config.xml inside it".
        if p.is_dir() {
            return Ok(p.join("config.xml"));
        }
        return Ok(p);
    }
    if let Some(mut base) = config_dir() {
        base.push("renamer");
        base.push("config.xml");
        return Ok(base);
    }
    env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("renamer")
                .join("config.xml")
        })
        .map_err(|_| anyhow!("cannot determine a config directory (no HOME)"))
}

/// OS-appropriate default log file path (data dir), colocated with an
/// explicit `$RENAMER_CONFIG`.
pub fn default_log_path() -> Result<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        let cfg = default_config_path()?;
        let parent = cfg.parent().unwrap_or_else(|| Path::new("."));
        return Ok(parent.join("renamer.log"));
    }
    if let Some(mut base) = data_dir() {
        base.push("renamer");
        base.push("renamer.log");
        return Ok(base);
    }
    env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("renamer")
                .join("renamer.log")
        })
        .map_err(|_| anyhow!("cannot determine a data directory (no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
