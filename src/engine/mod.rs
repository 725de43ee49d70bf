//! Transactional renamer.
//!
//! Applies a [`Plan`] one file at a time, keeps going past individual
//! failures and records every successful rename of an invocation as one
//! undoable batch.

mod history;
mod types;

pub use history::{Batch, UndoEntry, UndoStack};
pub use types::{FileOutcome, OutcomeKind, RenameReport, UndoReport};

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::VirinConfig;
use crate::output::{render_rename_report, render_undo_report};
use crate::progress::Progress;
use crate::scanner::{count_entries, UnreadableEntry};
use crate::sequencer::{plan, Plan, PlanError, PlannedRename, RenameRequest};

/// Rename/undo engine owning one undo history.
///
/// Calls must be serialized by the caller: both `apply` and `undo`
/// mutate the undo stack.
pub struct Renamer {
    config: VirinConfig,
    history: UndoStack,
    progress: Progress,
}

impl Renamer {
    pub fn new(config: VirinConfig) -> Self {
        Self {
            config,
            history: UndoStack::new(),
            progress: Progress::silent(),
        }
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Number of batches that can still be undone
    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    /// Compute the renames for `request` without touching the filesystem
    pub fn plan(&self, request: &RenameRequest) -> Result<Plan, PlanError> {
        plan(request, &self.config)
    }

    /// Plan and apply `request`
    pub fn rename(&mut self, request: &RenameRequest) -> Result<RenameReport, PlanError> {
        let plan = self.plan(request)?;
        Ok(self.apply(&plan))
    }

    /// Apply every planned rename in order, recording the successful ones as a batch.
    ///
    /// Matching files whose timestamps could not be read come last in the
    /// report, as `OsFailure` outcomes.
    pub fn apply(&mut self, plan: &Plan) -> RenameReport {
        let total = plan.len();
        let mut batch = Batch::new(plan.directory.clone());
        let mut outcomes = Vec::with_capacity(total + plan.unreadable.len());

        if !plan.is_empty() {
            self.progress.rename_start(total, &plan.directory);
        }

        for (i, op) in plan.renames.iter().enumerate() {
            let outcome = apply_one(op);

            if outcome.is_success() {
                info!("Renamed: {} -> {}", op.source_name, op.destination_name);
                self.progress
                    .rename_progress(i + 1, total, &op.source_name, &op.destination_name);
                batch.record(op.source_path.clone(), op.destination_path.clone());
            } else {
                warn!(
                    kind = ?outcome.kind,
                    detail = ?outcome.detail,
                    "Could not rename {}",
                    op.source_name
                );
                self.progress.warn(&format!(
                    "{}: {:?}",
                    op.source_name, outcome.kind
                ));
            }

            outcomes.push(outcome);
        }

        for entry in &plan.unreadable {
            warn!(reason = %entry.reason, "Could not rename {}", entry.name);
            self.progress.warn(&format!("{}: {}", entry.name, entry.reason));
            outcomes.push(unreadable_outcome(entry));
        }

        let recorded = if batch.is_empty() {
            false
        } else {
            let snapshot = match count_entries(&plan.directory) {
                Ok(count) => count,
                Err(e) => {
                    warn!(error = %e, "Could not recount directory, using planning count");
                    plan.entry_count
                }
            };
            debug!(snapshot, renames = batch.len(), "Recording batch");
            self.history.push(batch, snapshot)
        };

        let report = RenameReport {
            directory: plan.directory.clone(),
            extension: plan.extension.clone(),
            outcomes,
            recorded,
        };

        if !plan.is_empty() {
            self.progress
                .rename_complete(report.renamed_count(), report.failed_count());
        }

        report
    }

    /// Reverse the most recent batch.
    ///
    /// The batch is consumed unless the directory entry count no longer
    /// matches the one recorded with it, in which case nothing is touched
    /// and the batch stays on the stack.
    pub fn undo(&mut self) -> UndoReport {
        let Some(entry) = self.history.pop() else {
            info!("Nothing to undo");
            return UndoReport::NothingToUndo;
        };

        let directory = entry.batch.directory.clone();
        let found = count_entries(&directory).ok();

        if found != Some(entry.snapshot) {
            warn!(
                expected = entry.snapshot,
                found = ?found,
                "Directory modified since last rename, refusing to undo"
            );
            self.progress.warn(&format!(
                "{} has been modified, undo aborted",
                directory.display()
            ));

            let report = UndoReport::DirectoryDrift {
                directory,
                expected_entries: entry.snapshot,
                found_entries: found,
                expected_files: entry.batch.new_paths(),
            };
            self.history.restore(entry);
            return report;
        }

        let total = entry.batch.len();
        self.progress.undo_start(total);

        let mut outcomes = Vec::with_capacity(total);
        for (i, (original, new)) in entry.batch.renames.iter().rev().enumerate() {
            let outcome = revert_one(new, original);

            if outcome.is_success() {
                info!("Reverted: {} -> {}", outcome.from_name(), outcome.to_name());
                self.progress
                    .undo_progress(i + 1, total, &outcome.from_name(), &outcome.to_name());
            } else {
                warn!(kind = ?outcome.kind, "Could not revert {}", outcome.from_name());
                self.progress.warn(&format!(
                    "{}: {:?}",
                    outcome.from_name(),
                    outcome.kind
                ));
            }

            outcomes.push(outcome);
        }

        self.progress
            .undo_complete(outcomes.iter().filter(|o| o.is_success()).count());

        UndoReport::Reverted { outcomes }
    }

    /// Rename every matching file of `path` and return the text report
    pub fn rename_all_files(
        &mut self,
        path: &Path,
        selected_extension: &str,
        date: Option<&str>,
        shoot_num: u8,
        start_seq: u32,
    ) -> Result<String, PlanError> {
        let mut request = RenameRequest::new(path, selected_extension)
            .with_shoot(shoot_num)
            .with_start_seq(start_seq);
        if let Some(date) = date {
            request = request.with_date(date);
        }

        let report = self.rename(&request)?;
        Ok(render_rename_report(&report))
    }

    /// Undo the most recent batch and return the text report
    pub fn undo_rename(&mut self) -> String {
        render_undo_report(&self.undo())
    }
}

fn apply_one(op: &PlannedRename) -> FileOutcome {
    let from = op.source_path.as_path();
    let to = op.destination_path.as_path();

    if op.unchanged {
        return FileOutcome::new(OutcomeKind::NameCollision, from, to);
    }

    match fs::symlink_metadata(from) {
        Ok(metadata) if metadata.is_dir() => {
            return FileOutcome::new(OutcomeKind::IsADirectory, from, to);
        }
        Ok(_) => {}
        Err(e) => return FileOutcome::from_io_error(&e, from, to),
    }

    // fs::rename silently replaces an existing file on Unix
    if fs::symlink_metadata(to).is_ok() {
        return FileOutcome::new(OutcomeKind::NameCollision, from, to);
    }

    match fs::rename(from, to) {
        Ok(()) => FileOutcome::new(OutcomeKind::Renamed, from, to),
        Err(e) => FileOutcome::from_io_error(&e, from, to),
    }
}

fn unreadable_outcome(entry: &UnreadableEntry) -> FileOutcome {
    let mut outcome = FileOutcome::new(OutcomeKind::OsFailure, &entry.path, &entry.path);
    outcome.detail = Some(entry.reason.clone());
    outcome
}

fn revert_one(current: &Path, original: &Path) -> FileOutcome {
    if fs::symlink_metadata(original).is_ok() {
        return FileOutcome::new(OutcomeKind::NameCollision, current, original);
    }

    match fs::rename(current, original) {
        Ok(()) => FileOutcome::new(OutcomeKind::Renamed, current, original),
        Err(e) => FileOutcome::from_io_error(&e, current, original),
    }
}
