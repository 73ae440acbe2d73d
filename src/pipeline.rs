//! Plan construction and execution.
//!
//! Every input path becomes a [`Change`] whose proposal has its
//! discriminator stripped. The stages then run in order on each change, and
//! changes that end up pointing at their own original are dropped. The whole
//! plan is built before anything touches the disk.
//!
//! A dry run only reports the plan; two reported proposals may coincide,
//! since collisions are settled at move time. A real run moves the changes
//! one at a time in plan order, so the first of two colliding changes keeps
//! the base name and later ones get `(1)`, `(2)`, …
//! A change whose source already holds the name the move would pick is
//! left out of the result.
//!
//! The first error stops the run. Moves already made stay made.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::change::Change;
use crate::fs_ops::apply_change;
use crate::output::report_change;
use crate::stages::Stage;

/// Run options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Print `old -> new` for each change.
    pub report: bool,
    /// Plan and report only; never move anything.
    pub dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            report: true,
            dry_run: false,
        }
    }
}

/// An ordered list of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage (builder style).
    pub fn then(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage over the default change for `path`.
    pub fn plan_one(&self, path: &Path) -> Result<Change> {
        let mut change = Change::new(path);
        for stage in &self.stages {
            change = stage
                .apply(change)
                .with_context(|| format!("stage '{}' on {}", stage.describe(), path.display()))?;
        }
        Ok(change)
    }

    /// Build the plan: one change per path, no-ops removed, input order kept.
    pub fn plan<I, P>(&self, paths: I) -> Result<Vec<Change>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut plan = Vec::new();
        for path in paths {
            let change = self.plan_one(path.as_ref())?;
            if change.is_noop() {
                debug!(path = %change.original().display(), "unchanged; dropped from plan");
                continue;
            }
            plan.push(change);
        }
        Ok(plan)
    }

    /// Plan, then report (dry run) or apply and report each change.
    /// Returns the changes with `new` set to the planned or actually used path.
    pub fn run<I, P>(&self, paths: I, options: Options) -> Result<Vec<Change>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let plan = self.plan(paths)?;
        info!(changes = plan.len(), dry_run = options.dry_run, "plan ready");

        if options.dry_run {
            if options.report {
                for change in &plan {
                    report_change(change.original(), change.proposed());
                }
            }
            return Ok(plan);
        }

        let mut done = Vec::with_capacity(plan.len());
        for change in plan {
            let applied = apply_change(change)?;
            if applied.is_noop() {
                debug!(path = %applied.original().display(), "already settled; not moved");
                continue;
            }
            if options.report {
                report_change(applied.original(), applied.proposed());
            }
            done.push(applied);
        }
        Ok(done)
    }
}

/// Entry point: run `pipeline` over `paths` with `options`.
pub fn run<I, P>(paths: I, options: Options, pipeline: &Pipeline) -> Result<Vec<Change>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    pipeline.run(paths, options)
}

/// Flatten nested path collections into one list, keeping order.
pub fn flatten_paths<I, J, P>(groups: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = J>,
    J: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    groups.into_iter().flatten().map(Into::into).collect()
}
