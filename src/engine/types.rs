use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// How a single rename (or its reversal) ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Renamed,
    /// The source vanished before it could be renamed
    NotFound,
    PermissionDenied,
    /// The source turned out to be a directory
    IsADirectory,
    /// The target name is already taken, or the file already has its computed name
    NameCollision,
    /// Any other OS failure, see `FileOutcome::detail`
    OsFailure,
}

impl OutcomeKind {
    /// Map an I/O error onto the outcome taxonomy
    pub fn from_io_error(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => OutcomeKind::NotFound,
            io::ErrorKind::PermissionDenied => OutcomeKind::PermissionDenied,
            io::ErrorKind::IsADirectory => OutcomeKind::IsADirectory,
            io::ErrorKind::AlreadyExists => OutcomeKind::NameCollision,
            _ => OutcomeKind::OsFailure,
        }
    }
}

/// Result of one filesystem rename attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub kind: OutcomeKind,
    pub from: PathBuf,
    pub to: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FileOutcome {
    pub fn new(kind: OutcomeKind, from: &Path, to: &Path) -> Self {
        Self {
            kind,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            detail: None,
        }
    }

    pub fn from_io_error(err: &io::Error, from: &Path, to: &Path) -> Self {
        Self {
            kind: OutcomeKind::from_io_error(err),
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            detail: Some(format!("{:?}: {}", err.kind(), err)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == OutcomeKind::Renamed
    }

    pub fn from_name(&self) -> String {
        file_name(&self.from)
    }

    pub fn to_name(&self) -> String {
        file_name(&self.to)
    }

    pub fn from_stem(&self) -> String {
        file_stem(&self.from)
    }

    pub fn to_stem(&self) -> String {
        file_stem(&self.to)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Outcome of one rename invocation
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub directory: PathBuf,
    pub extension: String,
    pub outcomes: Vec<FileOutcome>,
    /// Whether a batch was pushed onto the undo stack
    pub recorded: bool,
}

impl RenameReport {
    /// No entry of the directory carried the requested extension
    pub fn no_matching_files(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn renamed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.renamed_count()
    }
}

/// Outcome of one undo invocation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UndoReport {
    NothingToUndo,
    /// The directory changed shape since the batch; nothing was touched
    DirectoryDrift {
        directory: PathBuf,
        expected_entries: usize,
        /// `None` when the directory could not be listed at all
        found_entries: Option<usize>,
        /// File names the batch produced, in the order they were applied
        expected_files: Vec<PathBuf>,
    },
    Reverted { outcomes: Vec<FileOutcome> },
}

impl UndoReport {
    pub fn outcomes(&self) -> &[FileOutcome] {
        match self {
            UndoReport::Reverted { outcomes } => outcomes,
            _ => &[],
        }
    }
}
