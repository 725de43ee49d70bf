use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::{ScannerError, UnreadableEntry};

/// Caller input for one rename invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    /// Directory holding the shoot
    pub directory: PathBuf,
    /// Extension to select, compared case-insensitively, leading dot optional
    pub extension: String,
    /// `YYYYMMDD` applied to the whole batch instead of per-file dates
    pub fixed_date: Option<String>,
    pub shoot: u8,
    /// First sequence number of every date group
    pub start_seq: u32,
}

impl RenameRequest {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
            fixed_date: None,
            shoot: 0,
            start_seq: 1,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.fixed_date = Some(date.into());
        self
    }

    pub fn with_shoot(mut self, shoot: u8) -> Self {
        self.shoot = shoot;
        self
    }

    pub fn with_start_seq(mut self, start_seq: u32) -> Self {
        self.start_seq = start_seq;
        self
    }

    /// Extension without a leading dot
    pub fn extension(&self) -> &str {
        self.extension.trim().trim_start_matches('.')
    }

    /// The fixed date, if one was given and is not blank
    pub fn fixed_date(&self) -> Option<&str> {
        self.fixed_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// A single planned rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRename {
    /// Absolute path of the file as found
    pub source_path: PathBuf,
    /// Current file name
    pub source_name: String,
    /// Absolute path the file will be renamed to
    pub destination_path: PathBuf,
    /// New file name, original extension kept
    pub destination_name: String,
    /// `YYYYMMDD` used in the identifier
    pub date: String,
    pub sequence: u32,
    /// The file already carries its computed name
    pub unchanged: bool,
}

impl PlannedRename {
    pub fn new(source_path: PathBuf, destination_name: String, date: String, sequence: u32) -> Self {
        let source_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let destination_path = source_path
            .parent()
            .map(|p| p.join(&destination_name))
            .unwrap_or_else(|| PathBuf::from(&destination_name));

        let unchanged = source_name == destination_name;

        Self {
            source_path,
            source_name,
            destination_path,
            destination_name,
            date,
            sequence,
            unchanged,
        }
    }
}

/// Ordered renames for one directory
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Absolute directory the plan was computed for
    pub directory: PathBuf,
    /// Requested extension, without leading dot
    pub extension: String,
    /// Number of directory entries seen while planning
    pub entry_count: usize,
    pub renames: Vec<PlannedRename>,
    /// Matching files that could not be ordered; each is reported as a failure
    pub unreadable: Vec<UnreadableEntry>,
}

impl Plan {
    /// No file carries the requested extension, readable or not
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty() && self.unreadable.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn unchanged_count(&self) -> usize {
        self.renames.iter().filter(|r| r.unchanged).count()
    }
}

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid date '{0}': expected YYYYMMDD")]
    InvalidDate(String),

    #[error("Too many files for one date when starting at sequence {start_seq} (maximum {max})", max = u32::MAX)]
    SequenceOverflow { start_seq: u32 },

    #[error(transparent)]
    Scanner(#[from] ScannerError),
}
