//! Unix implementations of platform helpers.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;
use tracing::{debug, trace};

/// Move `src` to `dst`, failing with `AlreadyExists` instead of replacing `dst`.
///
/// Linux uses `renameat2(RENAME_NOREPLACE)` so the check and the move are one
/// kernel operation. Filesystems without that flag, and other Unixes, use
/// hard-link + unlink: `link(2)` refuses an existing target the same way.
pub fn rename_no_clobber(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        match renameat2_noreplace(src, dst) {
            Ok(()) => return Ok(()),
            Err(e) if matches!(e.raw_os_error(), Some(libc::ENOSYS) | Some(libc::EINVAL)) => {
                debug!(error = %e, "renameat2(RENAME_NOREPLACE) unsupported; using link+unlink");
            }
            Err(e) => return Err(e),
        }
    }
    link_then_unlink(src, dst)
}

#[cfg(target_os = "linux")]
fn renameat2_noreplace(src: &Path, dst: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    const RENAME_NOREPLACE: libc::c_uint = 1;

    let c_src = CString::new(src.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))?;
    let c_dst = CString::new(dst.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))?;
    // SAFETY: both pointers come from live CStrings; AT_FDCWD resolves relative paths.
    let rc = unsafe {
        libc::syscall(
            libc::SYS_renameat2,
            libc::AT_FDCWD,
            c_src.as_ptr(),
            libc::AT_FDCWD,
            c_dst.as_ptr(),
            RENAME_NOREPLACE,
        )
    };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

fn link_then_unlink(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::hard_link(src, dst) {
        Ok(()) => {
            trace!(src = %src.display(), dst = %dst.display(), "linked; removing source name");
            fs::remove_file(src)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(e),
        Err(e) => {
            // No hard links here (FAT, some FUSE mounts): best-effort check then rename.
            debug!(error = %e, "hard link unavailable; falling back to checked rename");
            if dst.symlink_metadata().is_ok() {
                return Err(io::Error::from(io::ErrorKind::AlreadyExists));
            }
            fs::rename(src, dst)
        }
    }
}

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, we preserve its existing permissions.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}

/// Create a brand-new 0600 file (O_EXCL + O_NOFOLLOW) and write `contents`.
pub fn write_new_file_0600(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .custom_flags(libc::O_NOFOLLOW)
        .open(path)?;
    f.write_all(contents)?;
    f.sync_all()
}

/// POSIX chmod 0700 for directories.
pub fn set_dir_mode_0700(path: &Path) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}
