use std::path::PathBuf;

/// Successful renames of one invocation, in the order they were applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Directory every rename of the batch took place in
    pub directory: PathBuf,
    /// `(original, new)` absolute paths
    pub renames: Vec<(PathBuf, PathBuf)>,
}

impl Batch {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            renames: Vec::new(),
        }
    }

    pub fn record(&mut self, original: PathBuf, new: PathBuf) {
        self.renames.push((original, new));
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Paths the batch produced, in application order
    pub fn new_paths(&self) -> Vec<PathBuf> {
        self.renames.iter().map(|(_, new)| new.clone()).collect()
    }
}

/// A batch paired with the directory entry count observed right after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub batch: Batch,
    pub snapshot: usize,
}

/// In-memory undo history, most recent batch last.
///
/// Each batch is stored together with its snapshot, so the two can never
/// drift apart in length.
#[derive(Debug, Default)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a batch; empty batches are never recorded
    pub fn push(&mut self, batch: Batch, snapshot: usize) -> bool {
        if batch.is_empty() {
            return false;
        }
        self.entries.push(UndoEntry { batch, snapshot });
        true
    }

    /// Put a popped entry back unchanged
    pub fn restore(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
