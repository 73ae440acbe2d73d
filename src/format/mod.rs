//! The format mini-language used by the `Format` stage.
//!
//! A template is scanned once, left to right. `%` introduces a directive;
//! every other character is copied to the output. The character after `%`
//! selects a handler from the formatter's directive table:
//!
//! | directive | output                                               |
//! |-----------|------------------------------------------------------|
//! | `%%`      | a literal `%`                                        |
//! | `%0`-`%9` | capture group of the triggering match (`0` = whole)  |
//! | `%e`      | extension of the proposed path                       |
//! | `%n`      | stem of the proposed path                            |
//! | `%g`      | extension guessed from the original file's content   |
//! | `%x`      | hex checksum of the original file                    |
//! | `%t<c>`   | original file's mtime formatted with strftime `%<c>` |
//!
//! Handlers may consume more of the template than their own character
//! (`%t` takes one more). New handlers are added with [`Formatter::register`].

mod directives;

use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::change::Change;
use crate::config::Config;
use crate::errors::RenameError;

pub use directives::{
    CaptureGroup, Checksum, Literal, ModifiedTime, ProposedExt, ProposedName, SniffedExt,
};

/// Everything a directive may read while rendering.
pub struct FormatContext<'a> {
    /// The whole template being rendered.
    pub template: &'a str,
    /// Capture groups of the triggering match; index 0 is the whole match.
    /// `None` marks a group that did not participate.
    pub groups: &'a [Option<&'a str>],
    pub change: &'a Change,
    pub config: &'a Config,
}

/// A handler bound to one directive character.
pub trait Directive: Send + Sync {
    /// Append this directive's output to `out`. `rest` is the template after
    /// the directive character; return how many bytes of it were consumed.
    fn render(&self, out: &mut String, rest: &str, ctx: &FormatContext<'_>) -> Result<usize>;
}

impl<F> Directive for F
where
    F: Fn(&mut String, &str, &FormatContext<'_>) -> Result<usize> + Send + Sync,
{
    fn render(&self, out: &mut String, rest: &str, ctx: &FormatContext<'_>) -> Result<usize> {
        self(out, rest, ctx)
    }
}

/// Directive table plus the configuration the default handlers need.
#[derive(Clone)]
pub struct Formatter {
    directives: HashMap<char, Arc<dyn Directive>>,
    config: Config,
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<char> = self.directives.keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("Formatter")
            .field("directives", &keys)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Formatter {
    /// Formatter with the default directive table.
    pub fn new(config: Config) -> Self {
        let mut f = Self::empty(config);
        f.register('%', Literal('%'));
        f.register('e', ProposedExt);
        f.register('n', ProposedName);
        f.register('g', SniffedExt);
        f.register('x', Checksum);
        f.register('t', ModifiedTime);
        for (i, c) in ('0'..='9').enumerate() {
            f.register(c, CaptureGroup(i));
        }
        f
    }

    /// Formatter with no directives at all.
    pub fn empty(config: Config) -> Self {
        Self {
            directives: HashMap::new(),
            config,
        }
    }

    /// Bind `c` to `handler`, returning the handler it replaced.
    pub fn register(
        &mut self,
        c: char,
        handler: impl Directive + 'static,
    ) -> Option<Arc<dyn Directive>> {
        self.directives.insert(c, Arc::new(handler))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `template` for `change` with the capture `groups` of the
    /// match that triggered the stage.
    pub fn render(&self, template: &str, groups: &[Option<&str>], change: &Change) -> Result<String> {
        let ctx = FormatContext {
            template,
            groups,
            change,
            config: &self.config,
        };
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let mut chars = rest[pos + 1..].chars();
            let Some(c) = chars.next() else {
                return Err(RenameError::IncompleteFormat {
                    template: template.to_string(),
                }
                .into());
            };
            let tail = chars.as_str();
            let handler = self
                .directives
                .get(&c)
                .ok_or(RenameError::BadFormatCharacter(c))?;
            let consumed = handler.render(&mut out, tail, &ctx)?;
            rest = tail
                .get(consumed..)
                .ok_or_else(|| anyhow!("directive %{c} consumed {consumed} bytes past the template"))?;
        }
        out.push_str(rest);
        Ok(out)
    }
}
