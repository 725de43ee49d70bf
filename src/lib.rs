pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod sequencer;
pub mod session;

pub use config::{config_from_env, VirinConfig};
pub use engine::{Batch, FileOutcome, OutcomeKind, RenameReport, Renamer, UndoReport, UndoStack};
pub use error::{AppError, ExitCode};
pub use scanner::{
    count_entries, scan_directory, DirectoryScan, MediaEntry, ScannerError, UnreadableEntry,
};
pub use sequencer::{plan, Plan, PlanError, PlannedRename, RenameRequest};
