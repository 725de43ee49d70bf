//! Progress output for user-facing status updates.
//!
//! The engine reports each rename here as it happens. In verbose mode
//! output is suppressed since tracing handles everything.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Progress {
    /// Create a progress reporter that respects UI mode
    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        if !colors_enabled {
            colored::control::set_override(false);
        }
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a silent progress reporter
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report starting a rename batch
    pub fn rename_start(&mut self, total: usize, directory: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Renaming {} files in {}", total, directory.display()).bold()
            );
        } else {
            let _ = writeln!(self.writer, "Renaming {} files in {}", total, directory.display());
        }
    }

    /// Report progress on a single rename
    pub fn rename_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.dimmed(),
                "→".cyan(),
                to
            );
        } else {
            let _ = writeln!(self.writer, "[{}/{}] {} -> {}", current, total, from, to);
        }
    }

    /// Report rename batch complete
    pub fn rename_complete(&mut self, renamed: usize, failed: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = write!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} files renamed", renamed).green()
            );
            if failed > 0 {
                let _ = write!(self.writer, ", {}", format!("{} skipped", failed).yellow());
            }
            let _ = writeln!(self.writer);
        } else {
            let _ = writeln!(
                self.writer,
                "Rename complete. {} files renamed, {} skipped.",
                renamed, failed
            );
        }
    }

    /// Report an error during operation (non-fatal)
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report starting an undo
    pub fn undo_start(&mut self, total: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Undoing last batch ({} files)", total).bold()
            );
        } else {
            let _ = writeln!(self.writer, "Undoing last batch ({} files)", total);
        }
    }

    /// Report progress on a single reversal
    pub fn undo_progress(&mut self, current: usize, total: usize, from: &str, to: &str) {
        self.rename_progress(current, total, from, to);
    }

    /// Report undo complete
    pub fn undo_complete(&mut self, restored: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} files restored", restored).green()
            );
        } else {
            let _ = writeln!(self.writer, "Undo complete. {} files restored.", restored);
        }
    }
}
