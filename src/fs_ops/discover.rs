//! Directory discovery: the regular files directly inside each directory.
//!
//! One level only (no recursion); symlinks are not followed. Results are
//! sorted by path so a plan, and therefore collision numbering, is
//! reproducible between runs.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::RenameError;

pub fn list_files<I, P>(dirs: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = Vec::new();
    for dir in dirs {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(RenameError::DirectoryNotFound(dir.to_path_buf()).into());
        }
        let before = files.len();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("list directory '{}'", dir.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        debug!(dir = %dir.display(), count = files.len() - before, "discovered files");
    }
    files.sort();
    Ok(files)
}
