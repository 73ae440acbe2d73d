//! Pipeline stages.
//!
//! A stage maps one [`Change`] to one [`Change`], rewriting only the proposed
//! path. Stages are applied left to right, each one seeing what the earlier
//! ones produced. Four stages are provided:
//!
//! - [`Set`]: write a value into a part when a condition holds.
//! - [`Substitute`]: `Set` gated on a regex matching the value at a key.
//! - [`Replace`]: replace every regex match inside the value at a key.
//! - [`Format`]: render a template (see [`crate::format`]) when a regex
//!   matches the value at a key.
//!
//! Any `Fn(Change) -> Result<Change>` is a stage as well.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

use crate::change::{Change, Key};
use crate::format::Formatter;
use crate::part::Part;

/// One step of a rename pipeline.
pub trait Stage: Send + Sync {
    fn apply(&self, change: Change) -> Result<Change>;

    /// Short description for logs.
    fn describe(&self) -> String {
        "custom stage".to_string()
    }
}

impl<F> Stage for F
where
    F: Fn(Change) -> Result<Change> + Send + Sync,
{
    fn apply(&self, change: Change) -> Result<Change> {
        self(change)
    }
}

pub type ValueFn = Arc<dyn Fn(&Change) -> String + Send + Sync>;
pub type ChangePredicate = Arc<dyn Fn(&Change) -> bool + Send + Sync>;
pub type ValuePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// What a stage writes: a literal, or a value computed from the whole change.
#[derive(Clone)]
pub enum Value {
    Literal(String),
    Computed(ValueFn),
}

impl Value {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Change) -> String + Send + Sync + 'static,
    {
        Value::Computed(Arc::new(f))
    }

    fn resolve(&self, change: &Change) -> String {
        match self {
            Value::Literal(s) => s.clone(),
            Value::Computed(f) => f(change),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(s) => write!(f, "{s:?}"),
            Value::Computed(_) => f.write_str("<fn>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Literal(s)
    }
}

#[derive(Clone)]
enum Condition {
    Always,
    OnChange(ChangePredicate),
    OnPart(Key, ValuePredicate),
}

impl Condition {
    fn holds(&self, change: &Change) -> bool {
        match self {
            Condition::Always => true,
            Condition::OnChange(p) => p(change),
            Condition::OnPart(key, p) => p(&change.get(*key)),
        }
    }
}

/// Write `value` into `target` of the proposed path when the condition holds.
#[derive(Clone)]
pub struct Set {
    condition: Condition,
    target: Part,
    value: Value,
}

impl Set {
    /// Unconditionally write `value` into `target`.
    pub fn always(target: Part, value: impl Into<Value>) -> Self {
        Self {
            condition: Condition::Always,
            target,
            value: value.into(),
        }
    }

    /// Replace the whole proposed path when `predicate` accepts the change.
    pub fn when<P>(predicate: P, value: impl Into<Value>) -> Self
    where
        P: Fn(&Change) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Condition::OnChange(Arc::new(predicate)),
            target: Part::Path,
            value: value.into(),
        }
    }

    /// Write into `key.part` when `predicate` accepts the value read at `key`.
    pub fn when_part<P>(key: impl Into<Key>, predicate: P, value: impl Into<Value>) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let key = key.into();
        Self {
            condition: Condition::OnPart(key, Arc::new(predicate)),
            target: key.part,
            value: value.into(),
        }
    }

    /// Write into `target` instead of the default part.
    pub fn into_part(mut self, target: Part) -> Self {
        self.target = target;
        self
    }
}

impl Stage for Set {
    fn apply(&self, change: Change) -> Result<Change> {
        if !self.condition.holds(&change) {
            return Ok(change);
        }
        let value = self.value.resolve(&change);
        trace!(target = %self.target, value = %value, "set");
        Ok(change.set(self.target, &value))
    }

    fn describe(&self) -> String {
        format!("set {} = {:?}", self.target, self.value)
    }
}

/// `Set` gated on `pattern` matching the value at `key`.
#[derive(Clone)]
pub struct Substitute {
    key: Key,
    pattern: Regex,
    inner: Set,
}

impl Substitute {
    pub fn new(key: impl Into<Key>, pattern: &str, value: impl Into<Value>) -> Result<Self> {
        let regex = Regex::new(pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;
        Ok(Self::with_regex(key, regex, value))
    }

    pub fn with_regex(key: impl Into<Key>, pattern: Regex, value: impl Into<Value>) -> Self {
        let key = key.into();
        let re = pattern.clone();
        let inner = Set::when_part(key, move |v: &str| re.is_match(v), value);
        Self {
            key,
            pattern,
            inner,
        }
    }

    /// Write into `target` instead of the key's part.
    pub fn into_part(mut self, target: Part) -> Self {
        self.inner = self.inner.into_part(target);
        self
    }
}

impl Stage for Substitute {
    fn apply(&self, change: Change) -> Result<Change> {
        self.inner.apply(change)
    }

    fn describe(&self) -> String {
        format!(
            "substitute {} /{}/ -> {} = {:?}",
            self.key, self.pattern, self.inner.target, self.inner.value
        )
    }
}

/// Replace every match of `pattern` inside the current value at `key`.
///
/// A literal replacement may use `$1` / `${name}` back-references. A computed
/// replacement is evaluated once per change and inserted verbatim.
#[derive(Clone)]
pub struct Replace {
    key: Key,
    pattern: Regex,
    value: Value,
}

impl Replace {
    pub fn new(key: impl Into<Key>, pattern: &str, value: impl Into<Value>) -> Result<Self> {
        let regex = Regex::new(pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;
        Ok(Self::with_regex(key, regex, value))
    }

    pub fn with_regex(key: impl Into<Key>, pattern: Regex, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            pattern,
            value: value.into(),
        }
    }
}

impl Stage for Replace {
    fn apply(&self, change: Change) -> Result<Change> {
        let current = change.get(self.key);
        let replaced = match &self.value {
            Value::Literal(s) => self.pattern.replace_all(&current, s.as_str()),
            Value::Computed(f) => {
                let literal = f(&change);
                self.pattern.replace_all(&current, NoExpand(&literal))
            }
        };
        match replaced {
            Cow::Borrowed(_) => Ok(change),
            Cow::Owned(value) => {
                trace!(key = %self.key, from = %current, to = %value, "replace");
                Ok(change.set(self.key, &value))
            }
        }
    }

    fn describe(&self) -> String {
        format!("replace {} /{}/ with {:?}", self.key, self.pattern, self.value)
    }
}

/// Render `template` into `target` when `pattern` matches the value at `key`.
#[derive(Clone)]
pub struct Format {
    key: Key,
    pattern: Regex,
    target: Part,
    template: String,
    formatter: Arc<Formatter>,
}

impl Format {
    pub fn new(
        key: impl Into<Key>,
        pattern: &str,
        template: impl Into<String>,
        formatter: Arc<Formatter>,
    ) -> Result<Self> {
        let regex = Regex::new(pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;
        Ok(Self::with_regex(key, regex, template, formatter))
    }

    pub fn with_regex(
        key: impl Into<Key>,
        pattern: Regex,
        template: impl Into<String>,
        formatter: Arc<Formatter>,
    ) -> Self {
        let key = key.into();
        Self {
            key,
            pattern,
            target: key.part,
            template: template.into(),
            formatter,
        }
    }

    /// Write into `target` instead of the key's part.
    pub fn into_part(mut self, target: Part) -> Self {
        self.target = target;
        self
    }
}

impl Stage for Format {
    fn apply(&self, change: Change) -> Result<Change> {
        let value = change.get(self.key);
        let Some(caps) = self.pattern.captures(&value) else {
            return Ok(change);
        };
        let groups: Vec<Option<&str>> = caps.iter().map(|m| m.map(|m| m.as_str())).collect();
        let rendered = self
            .formatter
            .render(&self.template, &groups, &change)
            .with_context(|| {
                format!(
                    "format {:?} for {}",
                    self.template,
                    change.original().display()
                )
            })?;
        trace!(target = %self.target, value = %rendered, "format");
        Ok(change.set(self.target, &rendered))
    }

    fn describe(&self) -> String {
        format!(
            "format {} /{}/ -> {} = {:?}",
            self.key, self.pattern, self.target, self.template
        )
    }
}
