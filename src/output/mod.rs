use crate::engine::{FileOutcome, OutcomeKind, RenameReport, UndoReport};
use crate::sequencer::Plan;
use serde::Serialize;
use std::io::{self, Write};

/// Render a rename report as newline-joined text, one line per file
pub fn render_rename_report(report: &RenameReport) -> String {
    if report.no_matching_files() {
        return format!("Could not find any files with extension {}", report.extension);
    }

    report
        .outcomes
        .iter()
        .map(rename_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn rename_line(outcome: &FileOutcome) -> String {
    let old = outcome.from_stem();
    match outcome.kind {
        OutcomeKind::Renamed => format!("{} > {}", old, outcome.to_stem()),
        OutcomeKind::NotFound => format!("File not found: {}", old),
        OutcomeKind::PermissionDenied => format!("Permission Denied: {}", old),
        OutcomeKind::IsADirectory => format!("Error: Is a directory: {}", old),
        OutcomeKind::NameCollision => format!("File already exists: {}", old),
        OutcomeKind::OsFailure => format!(
            "An error has occurred with the OS renaming {}: {}",
            old,
            outcome.detail.as_deref().unwrap_or("unknown error")
        ),
    }
}

/// Render an undo report as newline-joined text
pub fn render_undo_report(report: &UndoReport) -> String {
    match report {
        UndoReport::NothingToUndo => "Nothing to undo".to_string(),
        UndoReport::DirectoryDrift { expected_files, .. } => {
            let mut lines =
                vec!["Target directory has been modified. Unable to undo! Expected:".to_string()];
            lines.extend(expected_files.iter().map(|p| p.display().to_string()));
            lines.join("\n")
        }
        UndoReport::Reverted { outcomes } => {
            let mut lines = vec!["Undo procedure stats:".to_string(), String::new()];
            lines.extend(outcomes.iter().map(undo_line));
            lines.join("\n")
        }
    }
}

fn undo_line(outcome: &FileOutcome) -> String {
    match outcome.kind {
        OutcomeKind::Renamed => format!("{} > {}", outcome.from_name(), outcome.to_name()),
        OutcomeKind::NotFound => format!("File not found to undo! {}", outcome.from.display()),
        OutcomeKind::NameCollision => {
            format!("This file exists and undo failed! {}", outcome.to_name())
        }
        OutcomeKind::PermissionDenied => format!("Permission Denied: {}", outcome.from_name()),
        OutcomeKind::IsADirectory => format!("Error: Is a directory: {}", outcome.from_name()),
        OutcomeKind::OsFailure => format!(
            "An error has occurred with the OS undoing {}: {}",
            outcome.from_name(),
            outcome.detail.as_deref().unwrap_or("unknown error")
        ),
    }
}

/// Display a plan without applying it
pub fn display_dry_run(plan: &Plan, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Directory:  {}", plan.directory.display())?;
    writeln!(writer, "Extension:  {}", plan.extension)?;
    writeln!(writer, "Files:      {}", plan.len())?;
    writeln!(writer)?;

    if plan.is_empty() {
        writeln!(
            writer,
            "Could not find any files with extension {}",
            plan.extension
        )?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, op) in plan.renames.iter().enumerate() {
        writeln!(writer, "  {}. {} #{:03}", i + 1, op.date, op.sequence)?;
        writeln!(writer, "     From: {}", op.source_name)?;
        writeln!(writer, "     To:   {}", op.destination_name)?;

        if op.unchanged {
            writeln!(writer, "     [!] Already named, will be skipped")?;
        }

        writeln!(writer)?;
    }

    for entry in &plan.unreadable {
        writeln!(writer, "  [!] {} cannot be read and will be skipped", entry.name)?;
        writeln!(writer, "      {}", entry.reason)?;
        writeln!(writer)?;
    }

    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(
        writer,
        "  {} files would be renamed",
        plan.len() - plan.unchanged_count()
    )?;

    let unchanged = plan.unchanged_count();
    if unchanged > 0 {
        writeln!(writer, "  {} files already named", unchanged)?;
    }
    if !plan.unreadable.is_empty() {
        writeln!(writer, "  {} files unreadable", plan.unreadable.len())?;
    }

    writeln!(writer)?;
    writeln!(writer, "Run without --dry to apply these changes.")?;

    Ok(())
}

/// Write any report as pretty JSON
pub fn display_json<T: Serialize>(value: &T, writer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

/// Print a rename report as text or JSON
pub fn display_rename_report(
    report: &RenameReport,
    json: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    if json {
        display_json(report, writer)
    } else {
        writeln!(writer, "{}", render_rename_report(report))
    }
}

/// Print an undo report as text or JSON
pub fn display_undo_report(
    report: &UndoReport,
    json: bool,
    writer: &mut impl Write,
) -> io::Result<()> {
    if json {
        display_json(report, writer)
    } else {
        writeln!(writer, "{}", render_undo_report(report))
    }
}
