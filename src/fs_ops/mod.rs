//! Filesystem operations: discovery, discriminators and collision-safe apply.

mod apply;
mod discover;
mod discriminator;
mod helpers;

pub use apply::{apply, apply_change};
pub use discover::list_files;
pub use discriminator::{strip_discriminator, with_discriminator};
pub use helpers::io_error_with_help;
