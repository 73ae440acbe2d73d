//! Collision-safe apply.
//!
//! Moves the original file to its proposed path without ever replacing an
//! existing file. When the proposed path is taken, the proposal's name is
//! used as a template and `name(1)ext`, `name(2)ext`, … are probed in order;
//! the first free one wins. The search has no upper bound.
//!
//! The existence probe and the move are separate steps. If another process
//! creates the target in between, the no-clobber move fails and the error is
//! surfaced as `OverwriteAttempted`; it is not retried.
//!
//! A source that already sits on the first free discriminated name stays
//! where it is, so repeated runs over a settled directory move nothing.

use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

use super::discriminator::with_discriminator;
use super::helpers::io_error_with_help;
use crate::change::Change;
use crate::errors::RenameError;
use crate::platform::rename_no_clobber;

/// Move `old` to `new` (or the first free discriminated variant of `new`)
/// and return the path actually used.
pub fn apply(old: &Path, new: &Path) -> Result<PathBuf> {
    if !occupied(new)? {
        move_no_clobber(old, new)?;
        info!(src = %old.display(), dest = %new.display(), "renamed");
        return Ok(new.to_path_buf());
    }

    warn!(dest = %new.display(), "target exists; searching for a free discriminator");
    let mut k: u64 = 1;
    loop {
        let candidate = with_discriminator(new, k);
        if candidate == old {
            debug!(path = %old.display(), discriminator = k, "already holds the first free discriminator");
            return Ok(old.to_path_buf());
        }
        if !occupied(&candidate)? {
            move_no_clobber(old, &candidate)?;
            info!(src = %old.display(), dest = %candidate.display(), discriminator = k, "renamed");
            return Ok(candidate);
        }
        trace!(candidate = %candidate.display(), "discriminator taken");
        k += 1;
    }
}

/// Apply a planned change and return it with `new` set to the path used.
pub fn apply_change(change: Change) -> Result<Change> {
    let actual = apply(change.original(), change.proposed())?;
    Ok(change.settle(actual))
}

/// A dangling symlink still occupies its name, so probe with lstat.
fn occupied(path: &Path) -> Result<bool> {
    match path.symlink_metadata() {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error_with_help("check target", path)(e)),
    }
}

fn move_no_clobber(old: &Path, new: &Path) -> Result<()> {
    rename_no_clobber(old, new).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            anyhow::Error::from(RenameError::OverwriteAttempted(new.to_path_buf()))
        } else {
            io_error_with_help("rename", old)(e)
        }
    })
}
