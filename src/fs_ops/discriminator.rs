//! Discriminator handling.
//!
//! A discriminator is a bracketed positive integer directly before the
//! extension: `photo(2).jpg`. Stripping removes it; adding inserts `(k)` in
//! the same position.
//!
//! Examples:
//! - "img(3).png" -> "img.png"
//! - "img.png" + 1 -> "img(1).png"
//! - "archive.tar(2).gz" -> "archive.tar.gz"

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::part::Part;

static TRAILING_DISCRIMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>.+)\([1-9][0-9]*\)$").expect("discriminator regex is valid")
});

/// Remove one trailing `(k)` from the file stem, if present.
///
/// A stem that is nothing but a discriminator (`(3).txt`) is left alone so
/// the result never turns into a dotfile.
pub fn strip_discriminator(path: &Path) -> PathBuf {
    let name = Part::Name.get(path);
    match TRAILING_DISCRIMINATOR.captures(&name) {
        Some(caps) => Part::Name.set(path, &caps["base"]),
        None => path.to_path_buf(),
    }
}

/// Insert `(k)` between the stem and the extension.
pub fn with_discriminator(path: &Path, k: u64) -> PathBuf {
    let name = Part::Name.get(path);
    Part::Name.set(path, &format!("{name}({k})"))
}
