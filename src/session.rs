//! Interactive session.
//!
//! Keeps one [`Renamer`] alive across commands read line by line, so that
//! a batch renamed earlier in the session can still be undone. Commands
//! run one after another, never concurrently.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::engine::Renamer;
use crate::error::AppError;
use crate::output::{display_rename_report, display_undo_report};
use crate::sequencer::RenameRequest;

const PROMPT: &str = "virin> ";

const HELP: &str = "Commands:
  rename   rename matching files again with the same options
  undo     revert the most recent rename batch
  status   show how many batches can be undone
  help     show this message
  quit     leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Rename,
    Undo,
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        match line.trim().to_ascii_lowercase().as_str() {
            "rename" | "r" => Ok(Command::Rename),
            "undo" | "u" => Ok(Command::Undo),
            "status" | "s" => Ok(Command::Status),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
        }
    }
}

/// Read commands from `input` until `quit` or end of input
pub fn run_session<R: BufRead, W: Write>(
    renamer: &mut Renamer,
    request: &RenameRequest,
    json: bool,
    input: R,
    output: &mut W,
) -> Result<(), AppError> {
    prompt(output)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(output)?;
            continue;
        }

        debug!(command = %line.trim(), "Session command");

        match Command::parse(&line) {
            Ok(Command::Rename) => match renamer.rename(request) {
                Ok(report) => display_rename_report(&report, json, output)?,
                Err(e) => {
                    let e = AppError::from(e);
                    warn!("{}", e);
                    writeln!(output, "Error: {}", e.detailed_message())?;
                }
            },
            Ok(Command::Undo) => display_undo_report(&renamer.undo(), json, output)?,
            Ok(Command::Status) => {
                writeln!(output, "{} batch(es) can be undone", renamer.undo_depth())?
            }
            Ok(Command::Help) => writeln!(output, "{}", HELP)?,
            Ok(Command::Quit) => return Ok(()),
            Err(message) => writeln!(output, "{}", message)?,
        }

        prompt(output)?;
    }

    writeln!(output)?;
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> io::Result<()> {
    write!(output, "{}", PROMPT)?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VirinConfig;
    use filetime::FileTime;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch_at(path: &Path, secs: i64) {
        fs::write(path, "content").unwrap();
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }

    fn run(renamer: &mut Renamer, request: &RenameRequest, script: &str) -> String {
        let mut output = Vec::new();
        run_session(renamer, request, false, Cursor::new(script.to_string()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("rename"), Ok(Command::Rename));
        assert_eq!(Command::parse("  UNDO "), Ok(Command::Undo));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert!(Command::parse("delete").is_err());
    }

    #[test]
    fn test_undo_within_session() {
        let dir = tempdir().unwrap();
        touch_at(&dir.path().join("MVI_0902.MP4"), 1_657_620_000);

        let mut renamer = Renamer::new(VirinConfig::default());
        let request = RenameRequest::new(dir.path(), "MP4");
        renamer.rename(&request).unwrap();

        let output = run(&mut renamer, &request, "status\nundo\nstatus\nquit\n");

        assert!(output.contains("1 batch(es) can be undone"));
        assert!(output.contains("20220712-F-F3965-0001.MP4 > MVI_0902.MP4"));
        assert!(output.contains("0 batch(es) can be undone"));
        assert!(dir.path().join("MVI_0902.MP4").exists());
    }

    #[test]
    fn test_rename_twice_reports_collisions() {
        let dir = tempdir().unwrap();
        touch_at(&dir.path().join("MVI_0902.MP4"), 1_657_620_000);

        let mut renamer = Renamer::new(VirinConfig::default());
        let request = RenameRequest::new(dir.path(), "MP4");

        let output = run(&mut renamer, &request, "rename\nrename\n");

        assert!(output.contains("MVI_0902 > 20220712-F-F3965-0001"));
        assert!(output.contains("File already exists: 20220712-F-F3965-0001"));
        assert_eq!(renamer.undo_depth(), 1);
    }

    #[test]
    fn test_unknown_command_and_empty_undo() {
        let dir = tempdir().unwrap();
        let mut renamer = Renamer::new(VirinConfig::default());
        let request = RenameRequest::new(dir.path(), "MP4");

        let output = run(&mut renamer, &request, "bogus\nundo\n");

        assert!(output.contains("Unknown command 'bogus'"));
        assert!(output.contains("Nothing to undo"));
    }

    #[test]
    fn test_rename_error_does_not_end_session() {
        let dir = tempdir().unwrap();
        let mut renamer = Renamer::new(VirinConfig::default());
        let request = RenameRequest::new(dir.path().join("missing"), "MP4");

        let output = run(&mut renamer, &request, "rename\nstatus\n");

        assert!(output.contains("does not exist"));
        assert!(output.contains("0 batch(es) can be undone"));
    }
}
