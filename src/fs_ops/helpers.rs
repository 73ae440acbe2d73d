//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path, and a short hint, for use
//! with `map_err` in anyhow code paths:
//!
//!   File::open(p).map_err(io_error_with_help("open file", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus a hint where one helps.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        match code {
            libc::EXDEV => msg.push_str(" (target is on another filesystem; renames cannot cross devices)"),
            libc::ENAMETOOLONG => msg.push_str(" (file name too long; shorten the template output)"),
            libc::EROFS => msg.push_str(" (read-only filesystem)"),
            _ => {}
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            msg.push_str(" (permission denied; check ownership and write permissions)");
        }
        io::ErrorKind::NotFound => {
            msg.push_str(" (path not found; was it renamed by another process?)");
        }
        io::ErrorKind::AlreadyExists => {
            msg.push_str(" (already exists)");
        }
        _ => {}
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
