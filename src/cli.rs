use clap::Parser;
use std::path::PathBuf;

use crate::sequencer::RenameRequest;

#[derive(Parser, Debug)]
#[command(name = "virin")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename media files to VIRIN identifiers (YYYYMMDD-F-F3965-SNNN)")]
pub struct Args {
    /// Directory containing the media files
    pub target_dir: PathBuf,

    /// Extension of the files to rename, case-insensitive (e.g. MP4, .jpg)
    #[arg(short, long)]
    pub ext: String,

    /// Use this date for every file instead of each file's own date
    #[arg(short = 'D', long, value_name = "YYYYMMDD")]
    pub date: Option<String>,

    /// Shoot number
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=9))]
    pub shoot: u8,

    /// Sequence number each date starts counting from
    #[arg(short = 'q', long, default_value = "1")]
    pub seq: u32,

    /// Show the planned names without renaming anything
    #[arg(short, long, conflicts_with = "interactive")]
    pub dry: bool,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Keep the session open after renaming to allow undo
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn to_request(&self) -> RenameRequest {
        let mut request = RenameRequest::new(&self.target_dir, &self.ext)
            .with_shoot(self.shoot)
            .with_start_seq(self.seq);
        if let Some(date) = &self.date {
            request = request.with_date(date.clone());
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["virin", "/shoot", "-e", "MP4"]).unwrap();
        let request = args.to_request();

        assert_eq!(request.directory, PathBuf::from("/shoot"));
        assert_eq!(request.extension(), "MP4");
        assert_eq!(request.fixed_date(), None);
        assert_eq!(request.shoot, 0);
        assert_eq!(request.start_seq, 1);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "virin", "/shoot", "--ext", ".jpg", "-D", "20240101", "-s", "3", "-q", "12",
        ])
        .unwrap();
        let request = args.to_request();

        assert_eq!(request.extension(), "jpg");
        assert_eq!(request.fixed_date(), Some("20240101"));
        assert_eq!(request.shoot, 3);
        assert_eq!(request.start_seq, 12);
    }

    #[test]
    fn test_shoot_must_be_single_digit() {
        assert!(Args::try_parse_from(["virin", "/shoot", "-e", "MP4", "-s", "10"]).is_err());
    }

    #[test]
    fn test_dry_conflicts_with_interactive() {
        assert!(Args::try_parse_from(["virin", "/shoot", "-e", "MP4", "-d", "-i"]).is_err());
    }
}
