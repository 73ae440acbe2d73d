//! Default directive handlers.

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;

use super::{Directive, FormatContext};
use crate::checksum::file_digest;
use crate::errors::RenameError;
use crate::fs_ops::io_error_with_help;
use crate::part::Part;

/// Emits a fixed character (`%%`).
#[derive(Debug, Clone, Copy)]
pub struct Literal(pub char);

impl Directive for Literal {
    fn render(&self, out: &mut String, _rest: &str, _ctx: &FormatContext<'_>) -> Result<usize> {
        out.push(self.0);
        Ok(0)
    }
}

/// Capture group `n` of the triggering match.
#[derive(Debug, Clone, Copy)]
pub struct CaptureGroup(pub usize);

impl Directive for CaptureGroup {
    fn render(&self, out: &mut String, _rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        match ctx.groups.get(self.0) {
            Some(group) => {
                out.push_str(group.unwrap_or(""));
                Ok(0)
            }
            None => Err(RenameError::MissingCaptureGroup {
                index: self.0,
                available: ctx.groups.len(),
            }
            .into()),
        }
    }
}

/// Extension of the proposed path (`%e`).
#[derive(Debug, Clone, Copy)]
pub struct ProposedExt;

impl Directive for ProposedExt {
    fn render(&self, out: &mut String, _rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        out.push_str(&Part::Ext.get(ctx.change.proposed()));
        Ok(0)
    }
}

/// Stem of the proposed path (`%n`).
#[derive(Debug, Clone, Copy)]
pub struct ProposedName;

impl Directive for ProposedName {
    fn render(&self, out: &mut String, _rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        out.push_str(&Part::Name.get(ctx.change.proposed()));
        Ok(0)
    }
}

/// Extension guessed from the original file's content (`%g`).
#[derive(Debug, Clone, Copy)]
pub struct SniffedExt;

impl Directive for SniffedExt {
    fn render(&self, out: &mut String, _rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        let ext = ctx.config.sniffer().guess_extension(ctx.change.original())?;
        out.push_str(&ext);
        Ok(0)
    }
}

/// Hex digest of the original file (`%x`).
#[derive(Debug, Clone, Copy)]
pub struct Checksum;

impl Directive for Checksum {
    fn render(&self, out: &mut String, _rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        out.push_str(&file_digest(ctx.change.original(), ctx.config.algorithm)?);
        Ok(0)
    }
}

/// One strftime field of the original file's mtime (`%t<c>`), local time.
#[derive(Debug, Clone, Copy)]
pub struct ModifiedTime;

impl Directive for ModifiedTime {
    fn render(&self, out: &mut String, rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        let Some(c) = rest.chars().next() else {
            return Err(RenameError::IncompleteFormat {
                template: ctx.template.to_string(),
            }
            .into());
        };

        let spec = format!("%{c}");
        let items: Vec<Item<'_>> = StrftimeItems::new(&spec).collect();
        if items.iter().any(|i| matches!(i, Item::Error)) {
            return Err(RenameError::BadFormatCharacter(c).into());
        }

        let original = ctx.change.original();
        let modified = fs::metadata(original)
            .and_then(|m| m.modified())
            .map_err(io_error_with_help("read modification time", original))?;
        let local: DateTime<Local> = modified.into();
        write!(out, "{}", local.format_with_items(items.iter()))
            .map_err(|_| RenameError::BadFormatCharacter(c))?;
        Ok(c.len_utf8())
    }
}
