//! Core library for `renamer`.
//!
//! Plans bulk renames from composable stages and applies them without ever
//! replacing an existing file:
//!
//! - [`part`]: read/rewrite one piece of a path (parent, file, name, ext).
//! - [`change`]: original path + proposed path, with qualified keys.
//! - [`stages`]: `Set`, `Substitute`, `Replace`, `Format`.
//! - [`format`]: the `%` template mini-language used by `Format`.
//! - [`pipeline`]: build the plan, then report it or apply it.
//! - [`fs_ops`]: discovery, discriminators and collision-safe moves.
//!
//! ```no_run
//! use renamer::{Options, Part, Pipeline, Replace, list_files};
//!
//! let files = list_files(["notes"])?;
//! let pipeline = Pipeline::new().then(Replace::new(Part::Ext, "md", "txt")?);
//! let changes = pipeline.run(files, Options::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod change;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod fs_ops;
pub mod output;
pub mod part;
pub mod pipeline;
pub mod platform;
pub mod sniff;
pub mod stages;

pub use change::{Change, Key, Side};
pub use checksum::{Algorithm, file_digest};
pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::RenameError;
pub use format::{Directive, FormatContext, Formatter};
pub use fs_ops::{apply, apply_change, list_files, strip_discriminator, with_discriminator};
pub use part::Part;
pub use pipeline::{Options, Pipeline, flatten_paths, run};
pub use sniff::Sniffer;
pub use stages::{Format, Replace, Set, Stage, Substitute, Value};
