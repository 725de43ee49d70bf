use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// A single entry of the target directory, with the timestamps used for ordering
#[derive(Debug, Clone)]
pub struct MediaEntry {
    /// Full file name, extension included
    pub name: String,
    /// Absolute path of the entry
    pub path: PathBuf,
    pub is_dir: bool,
    /// Last-modified time
    pub modified: DateTime<Utc>,
    /// Status-change time on Unix, creation time elsewhere
    pub changed: DateTime<Utc>,
}

impl MediaEntry {
    /// The earlier of the modification and status-change times
    pub fn effective_time(&self) -> DateTime<Utc> {
        self.modified.min(self.changed)
    }

    /// File name without its final extension
    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Final extension without the leading dot, as found on disk
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_string())
    }

    /// Case-insensitive extension match. Directories never match.
    pub fn matches_extension(&self, wanted: &str) -> bool {
        !self.is_dir && extension_matches(&self.name, wanted)
    }
}

/// An entry whose metadata could not be read, so it has no place in the
/// timestamp order. A broken symlink is the usual case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableEntry {
    pub name: String,
    pub path: PathBuf,
    /// The error met while reading the metadata
    pub reason: String,
}

impl UnreadableEntry {
    pub fn matches_extension(&self, wanted: &str) -> bool {
        extension_matches(&self.name, wanted)
    }
}

/// Every entry of one resolved directory
#[derive(Debug, Clone)]
pub struct DirectoryScan {
    /// Absolute path of the scanned directory
    pub directory: PathBuf,
    /// Readable entries, oldest first
    pub entries: Vec<MediaEntry>,
    pub unreadable: Vec<UnreadableEntry>,
}

impl DirectoryScan {
    /// Number of directory entries seen, readable or not
    pub fn entry_count(&self) -> usize {
        self.entries.len() + self.unreadable.len()
    }
}

fn extension_matches(name: &str, wanted: &str) -> bool {
    let wanted = wanted.trim_start_matches('.');
    match Path::new(name).extension() {
        Some(ext) => ext.to_string_lossy().eq_ignore_ascii_case(wanted),
        None => false,
    }
}

/// Resolve `target` to an absolute path and check that it is an existing directory
pub fn resolve_directory(target: &Path) -> Result<PathBuf, ScannerError> {
    let absolute = std::path::absolute(target)?;

    if !absolute.exists() {
        return Err(ScannerError::PathNotFound(absolute));
    }

    if !absolute.is_dir() {
        return Err(ScannerError::NotADirectory(absolute));
    }

    Ok(absolute)
}

/// List every entry of `target`, ordered by effective timestamp (oldest first).
///
/// Entries sharing a timestamp are ordered by name so that the resulting
/// shoot order does not depend on the filesystem's listing order. Entries
/// without readable metadata are kept aside in `unreadable`.
pub fn scan_directory(target: &Path) -> Result<DirectoryScan, ScannerError> {
    debug!(path = ?target, "Scanning directory");

    let target = resolve_directory(target)?;
    let mut entries = Vec::new();
    let mut unreadable = Vec::new();

    for entry in read_dir(&target)? {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        let read_times = fs::metadata(&path).and_then(|m| m.modified().map(|t| (m, t)));
        let (metadata, modified) = match read_times {
            Ok((m, t)) => (m, DateTime::<Utc>::from(t)),
            Err(e) => {
                warn!(name = %name, error = %e, "Entry has no readable timestamps");
                unreadable.push(UnreadableEntry {
                    name,
                    path,
                    reason: format!("{:?}: {}", e.kind(), e),
                });
                continue;
            }
        };
        let changed = status_changed(&metadata).unwrap_or(modified);

        entries.push(MediaEntry {
            name,
            path,
            is_dir: metadata.is_dir(),
            modified,
            changed,
        });
    }

    entries.sort_by(|a, b| {
        a.effective_time()
            .cmp(&b.effective_time())
            .then_with(|| a.name.cmp(&b.name))
    });

    unreadable.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(
        count = entries.len(),
        unreadable = unreadable.len(),
        "Scan complete"
    );

    Ok(DirectoryScan {
        directory: target,
        entries,
        unreadable,
    })
}

/// Number of entries (files, directories, anything) directly inside `target`
pub fn count_entries(target: &Path) -> Result<usize, ScannerError> {
    let mut count = 0;
    for entry in read_dir(target)? {
        entry?;
        count += 1;
    }
    trace!(path = ?target, count, "Counted directory entries");
    Ok(count)
}

fn read_dir(target: &Path) -> Result<fs::ReadDir, ScannerError> {
    fs::read_dir(target).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ScannerError::PermissionDenied(target.to_path_buf()),
        std::io::ErrorKind::NotFound => ScannerError::PathNotFound(target.to_path_buf()),
        _ => ScannerError::IoError(e),
    })
}

#[cfg(unix)]
fn status_changed(metadata: &Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;
    DateTime::from_timestamp(metadata.ctime(), metadata.ctime_nsec() as u32)
}

#[cfg(not(unix))]
fn status_changed(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.created().ok().map(DateTime::<Utc>::from)
}
