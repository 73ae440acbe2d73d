//! Path parts: read and rewrite one piece of a path while keeping the rest.
//!
//! A path decomposes as `parent / file` and `file = name + ext`, where `ext`
//! carries its leading dot (or is empty). Every setter recomposes from the
//! untouched parts, so `part.set(p, &part.get(p)) == p` for every part.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One independently readable and settable piece of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The whole path.
    Path,
    /// Containing directory.
    Parent,
    /// Full file name (`name` + `ext`).
    File,
    /// File name without extension.
    Name,
    /// Extension including the leading dot, or empty.
    Ext,
}

impl Part {
    pub const ALL: [Part; 5] = [Part::Path, Part::Parent, Part::File, Part::Name, Part::Ext];

    /// Read this part of `path` as a plain string.
    pub fn get(self, path: &Path) -> String {
        match self {
            Part::Path => path.to_string_lossy().into_owned(),
            Part::Parent => parent_of(path).to_string_lossy().into_owned(),
            Part::File => file_of(path),
            Part::Name => name_of(path),
            Part::Ext => ext_of(path),
        }
    }

    /// Return a copy of `path` with this part replaced by `value`.
    pub fn set(self, path: &Path, value: &str) -> PathBuf {
        match self {
            Part::Path => PathBuf::from(value),
            Part::Parent => compose(Path::new(value), &file_of(path)),
            Part::File => compose(parent_of(path), value),
            Part::Name => compose(parent_of(path), &format!("{value}{}", ext_of(path))),
            Part::Ext => compose(
                parent_of(path),
                &format!("{}{}", name_of(path), normalize_ext(value)),
            ),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Part::Path => "path",
            Part::Parent => "parent",
            Part::File => "file",
            Part::Name => "name",
            Part::Ext => "ext",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "path" => Ok(Part::Path),
            "parent" | "dir" => Ok(Part::Parent),
            "file" => Ok(Part::File),
            "name" | "stem" => Ok(Part::Name),
            "ext" | "extension" => Ok(Part::Ext),
            _ => Err(format!("invalid part: '{s}'")),
        }
    }
}

/// Prefix a non-empty extension with `.` when it lacks one.
pub fn normalize_ext(value: &str) -> String {
    if value.is_empty() || value.starts_with('.') {
        value.to_string()
    } else {
        format!(".{value}")
    }
}

/// A path without a file name (`/`, `..`) is treated as all parent.
fn parent_of(path: &Path) -> &Path {
    if path.file_name().is_none() {
        return path;
    }
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn file_of(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn ext_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

fn compose(parent: &Path, file: &str) -> PathBuf {
    if file.is_empty() {
        parent.to_path_buf()
    } else {
        parent.join(file)
    }
}
