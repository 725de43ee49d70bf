mod codes;

pub use codes::ExitCode;

use crate::scanner::ScannerError;
use crate::sequencer::PlanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Target directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Invalid date: {date}")]
    InvalidDate { date: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::InvalidDate { .. } => ExitCode::InvalidDate,
            AppError::InvalidArguments(_) => ExitCode::InvalidArguments,
            AppError::Io(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide the directory holding the media files.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::InvalidDate { date } => {
                format!(
                    "The date '{}' is not a valid calendar date.\n\n\
                     Expected format: YYYYMMDD (e.g. 20220712).\n\
                     Leave the date out to use each file's own date.",
                    date
                )
            }

            AppError::InvalidArguments(message) => message.clone(),

            AppError::Io(e) => format!("An I/O error occurred:\n  {}", e),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Io(e),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::InvalidDate(date) => AppError::InvalidDate { date },
            err @ PlanError::SequenceOverflow { .. } => AppError::InvalidArguments(format!(
                "{}.\n\nChoose a lower starting sequence number (-q).",
                err
            )),
            PlanError::Scanner(e) => e.into(),
        }
    }
}
