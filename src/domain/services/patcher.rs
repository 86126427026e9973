//! Text region patcher
//!
//! Applies the marker block rules to real files through the `FileSystem`
//! port. Every change is first computed as a `PatchPlan`; a dry run emits the
//! plan and stops there, a real run emits it and writes. Both paths share
//! the same computation.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::marker_block::MarkerStyle;
use crate::domain::ports::{FileSystem, FsResult, RunEvent, RunEventSink};
use crate::domain::value_objects::ExecutionContext;
use crate::error::{EzproxyError, EzproxyResult};

/// Classification of a planned change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    /// File does not exist yet
    Create,
    /// Block appended to an existing file
    Append,
    /// Existing block replaced
    Replace,
    /// Whole structured document rewritten
    Rewrite,
    /// Block removed
    Remove,
    /// Content already matches
    Unchanged,
    /// Nothing to remove
    Noop,
}

impl PatchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchAction::Create => "create",
            PatchAction::Append => "append to",
            PatchAction::Replace => "update",
            PatchAction::Rewrite => "rewrite",
            PatchAction::Remove => "remove ezproxy block from",
            PatchAction::Unchanged => "leave unchanged",
            PatchAction::Noop => "leave untouched",
        }
    }
}

/// A computed, not-yet-committed file change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchPlan {
    pub path: PathBuf,
    pub action: PatchAction,
    /// Content on disk (`None` if the file does not exist)
    pub before: Option<String>,
    /// Content to write (`None` means leave the file alone)
    pub after: Option<String>,
}

impl PatchPlan {
    /// Whether committing would touch the disk
    pub fn writes(&self) -> bool {
        match &self.after {
            Some(after) => self.before.as_ref() != Some(after),
            None => false,
        }
    }
}

pub struct TextRegionPatcher<'a> {
    fs: &'a dyn FileSystem,
    exec: ExecutionContext,
    events: &'a dyn RunEventSink,
}

impl<'a> TextRegionPatcher<'a> {
    pub fn new(fs: &'a dyn FileSystem, exec: ExecutionContext, events: &'a dyn RunEventSink) -> Self {
        Self { fs, exec, events }
    }

    /// Compute the plan for inserting/replacing the block
    pub fn plan_upsert(&self, path: &Path, body: &str, style: MarkerStyle) -> FsResult<PatchPlan> {
        let before = self.fs.read_optional(path)?;
        let (action, after) = match before.as_deref() {
            None => (PatchAction::Create, style.upsert("", body)),
            Some(existing) => {
                let after = style.upsert(existing, body);
                let action = if after == existing {
                    PatchAction::Unchanged
                } else if style.body(existing).is_some() {
                    PatchAction::Replace
                } else {
                    PatchAction::Append
                };
                (action, after)
            }
        };
        Ok(PatchPlan {
            path: path.to_path_buf(),
            action,
            before,
            after: Some(after),
        })
    }

    /// Compute the plan for deleting the block
    pub fn plan_remove(&self, path: &Path, style: MarkerStyle) -> FsResult<PatchPlan> {
        let before = self.fs.read_optional(path)?;
        let after = before.as_deref().and_then(|existing| style.remove(existing));
        let action = if after.is_some() {
            PatchAction::Remove
        } else {
            PatchAction::Noop
        };
        Ok(PatchPlan {
            path: path.to_path_buf(),
            action,
            before,
            after,
        })
    }

    /// Compute the plan for replacing a whole (structured) document
    pub fn plan_rewrite(&self, path: &Path, content: String) -> FsResult<PatchPlan> {
        let before = self.fs.read_optional(path)?;
        let action = match before.as_deref() {
            None => PatchAction::Create,
            Some(existing) if existing == content => PatchAction::Unchanged,
            Some(_) => PatchAction::Rewrite,
        };
        Ok(PatchPlan {
            path: path.to_path_buf(),
            action,
            before,
            after: Some(content),
        })
    }

    /// Emit the plan and, outside a dry run, write it
    pub fn commit(&self, plan: PatchPlan) -> FsResult<PatchPlan> {
        let simulated = self.exec.dry_run;
        self.events.on_event(RunEvent::FilePlanned {
            plan: plan.clone(),
            simulated,
        });

        if simulated || !plan.writes() {
            debug!(path = %plan.path.display(), action = plan.action.as_str(), simulated, "patch not written");
            return Ok(plan);
        }

        if let Some(after) = &plan.after {
            self.fs.write(&plan.path, after)?;
            debug!(path = %plan.path.display(), action = plan.action.as_str(), "patch written");
        }
        Ok(plan)
    }

    /// Ensure exactly one block with `body` exists in `path`
    pub fn upsert(&self, path: &Path, body: &str, style: MarkerStyle) -> FsResult<PatchPlan> {
        let plan = self.plan_upsert(path, body, style)?;
        self.commit(plan)
    }

    /// Delete the block from `path`; a missing file or block is a no-op
    pub fn remove(&self, path: &Path, style: MarkerStyle) -> FsResult<PatchPlan> {
        let plan = self.plan_remove(path, style)?;
        self.commit(plan)
    }

    /// Replace the whole document at `path`
    pub fn rewrite(&self, path: &Path, content: String) -> FsResult<PatchPlan> {
        let plan = self.plan_rewrite(path, content)?;
        self.commit(plan)
    }

    /// True iff a start delimiter is present; unreadable files count as false
    pub fn has_block(&self, path: &Path, style: MarkerStyle) -> bool {
        match self.fs.read_optional(path) {
            Ok(Some(content)) => style.contains_block(&content),
            _ => false,
        }
    }

    /// Block body, or `None` when there is no complete block
    pub fn find_block_body(&self, path: &Path, style: MarkerStyle) -> FsResult<Option<String>> {
        Ok(self
            .fs
            .read_optional(path)?
            .and_then(|content| style.body(&content).map(str::to_string)))
    }

    /// Block body, failing with `BlockNotFound` when absent
    pub fn block_body(&self, path: &Path, style: MarkerStyle) -> EzproxyResult<String> {
        self.find_block_body(path, style)?
            .ok_or_else(|| EzproxyError::BlockNotFound {
                path: path.to_path_buf(),
            })
    }

    /// Read-only access for structured adapters
    pub fn read_optional(&self, path: &Path) -> FsResult<Option<String>> {
        self.fs.read_optional(path)
    }
}
