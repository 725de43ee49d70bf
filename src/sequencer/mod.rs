mod identifier;
mod types;

pub use identifier::{build_file_name, format_date, validate_date, Virin};
pub use types::{Plan, PlanError, PlannedRename, RenameRequest};

use tracing::{debug, info, warn};

use crate::config::VirinConfig;
use crate::scanner::scan_directory;

/// Order the matching files of `request.directory` and assign each its new name.
///
/// Files are taken oldest first. The running sequence restarts at
/// `start_seq` whenever the date changes and advances for every matching
/// file, including files that already carry their computed name.
pub fn plan(request: &RenameRequest, config: &VirinConfig) -> Result<Plan, PlanError> {
    let fixed_date = request.fixed_date();
    if let Some(date) = fixed_date {
        validate_date(date)?;
    }

    let scan = scan_directory(&request.directory)?;
    let extension = request.extension().to_string();

    let mut renames = Vec::new();
    let mut current_date: Option<String> = None;
    // None once the counter has passed u32::MAX
    let mut next_sequence = Some(request.start_seq);

    for entry in scan.entries.iter().filter(|e| e.matches_extension(&extension)) {
        let date = match fixed_date {
            Some(d) => d.to_string(),
            None => format_date(entry.effective_time()),
        };

        if current_date.as_deref() != Some(date.as_str()) {
            debug!(date = %date, "Starting new date group");
            next_sequence = Some(request.start_seq);
            current_date = Some(date.clone());
        }

        let sequence = next_sequence.ok_or(PlanError::SequenceOverflow {
            start_seq: request.start_seq,
        })?;

        let virin = Virin {
            date: &date,
            branch: &config.branch,
            unit_id: &config.unit_id,
            shoot: request.shoot,
            sequence,
        };
        let destination_name = build_file_name(&virin, entry.extension().as_deref());

        debug!(from = %entry.name, to = %destination_name, "Planned rename");
        renames.push(PlannedRename::new(
            entry.path.clone(),
            destination_name,
            date.clone(),
            sequence,
        ));

        next_sequence = sequence.checked_add(1);
    }

    let unreadable: Vec<_> = scan
        .unreadable
        .iter()
        .filter(|e| e.matches_extension(&extension))
        .cloned()
        .collect();

    info!(
        "Planned {} renames for .{} in {:?}",
        renames.len(),
        extension,
        scan.directory
    );
    if !unreadable.is_empty() {
        warn!(count = unreadable.len(), "Matching files without readable timestamps");
    }

    Ok(Plan {
        entry_count: scan.entry_count(),
        directory: scan.directory,
        extension,
        renames,
        unreadable,
    })
}
