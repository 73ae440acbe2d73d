//! A planned rename: the original path paired with its proposed path.
//!
//! Reads go through a qualified [`Key`] that names a side and a part
//! (`old-name`, `new-ext`, or just `name`, which means the proposed side).
//! Writes always land on the proposed side, whatever side the key read
//! from. That is what lets a stage derive a new value from the original
//! path while the original itself stays untouched.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::fs_ops::strip_discriminator;
use crate::part::Part;

/// Which path of a [`Change`] a key reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// The original path, fixed at creation.
    Old,
    /// The proposed path (default).
    #[default]
    New,
}

/// A qualified accessor: side plus part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub side: Side,
    pub part: Part,
}

impl Key {
    /// Key reading from the original path.
    pub const fn original(part: Part) -> Self {
        Self { side: Side::Old, part }
    }

    /// Key reading from the proposed path.
    pub const fn proposed(part: Part) -> Self {
        Self { side: Side::New, part }
    }
}

impl From<Part> for Key {
    fn from(part: Part) -> Self {
        Key::proposed(part)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Old => "old",
            Side::New => "new",
        };
        write!(f, "{side}-{}", self.part)
    }
}

impl FromStr for Key {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let (side, part) = match lower.split_once('-') {
            Some(("old", part)) => (Side::Old, part),
            Some(("new", part)) => (Side::New, part),
            Some(_) => return Err(format!("invalid key: '{s}'")),
            None => (Side::New, lower.as_str()),
        };
        let part = part
            .parse::<Part>()
            .map_err(|_| format!("invalid key: '{s}'"))?;
        Ok(Key { side, part })
    }
}

/// Original path plus the currently proposed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    old: PathBuf,
    new: PathBuf,
}

impl Change {
    /// Start a change for a discovered path; the proposal drops any
    /// trailing discriminator so collisions can be renumbered on apply.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let old = path.into();
        let new = strip_discriminator(&old);
        Self { old, new }
    }

    /// Build a change with an explicit proposal.
    pub fn with_proposal(old: impl Into<PathBuf>, new: impl Into<PathBuf>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn original(&self) -> &Path {
        &self.old
    }

    pub fn proposed(&self) -> &Path {
        &self.new
    }

    /// True when the proposal leaves the file where it is.
    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }

    /// Read `key.part` from the side named by `key`.
    pub fn get(&self, key: impl Into<Key>) -> String {
        let key = key.into();
        key.part.get(self.side(key.side))
    }

    /// Write a literal into `key.part` of the proposed path.
    pub fn set(&self, key: impl Into<Key>, value: &str) -> Change {
        let key = key.into();
        Change {
            old: self.old.clone(),
            new: key.part.set(&self.new, value),
        }
    }

    /// Read via `key`, transform with `f`, and write the result into
    /// `key.part` of the proposed path.
    pub fn update<F>(&self, key: impl Into<Key>, f: F) -> Change
    where
        F: FnOnce(&str) -> String,
    {
        let key = key.into();
        let value = f(&self.get(key));
        self.set(key, &value)
    }

    /// Replace the proposal wholesale (used once a move picked the real target).
    pub(crate) fn settle(self, actual: PathBuf) -> Change {
        Change {
            old: self.old,
            new: actual,
        }
    }

    fn side(&self, side: Side) -> &Path {
        match side {
            Side::Old => &self.old,
            Side::New => &self.new,
        }
    }
}
