use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::types::PlanError;

// VIRIN: <YYYYMMDD>-<branch>-<unit id>-<shoot><seq:03>
// Example: 20220712-F-F3965-0001
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").unwrap());

/// A Visual Information Record Identification Number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Virin<'a> {
    pub date: &'a str,
    pub branch: &'a str,
    pub unit_id: &'a str,
    pub shoot: u8,
    pub sequence: u32,
}

impl fmt::Display for Virin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}{:03}",
            self.date, self.branch, self.unit_id, self.shoot, self.sequence
        )
    }
}

/// Build the new file name: the identifier followed by the original extension
pub fn build_file_name(virin: &Virin<'_>, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}.{}", virin, ext),
        None => virin.to_string(),
    }
}

/// Calendar date of `time` in UTC, as `YYYYMMDD`
pub fn format_date(time: DateTime<Utc>) -> String {
    format!("{:04}{:02}{:02}", time.year(), time.month(), time.day())
}

/// Check a caller-supplied fixed date
pub fn validate_date(date: &str) -> Result<(), PlanError> {
    if !DATE_REGEX.is_match(date) || NaiveDate::parse_from_str(date, "%Y%m%d").is_err() {
        return Err(PlanError::InvalidDate(date.to_string()));
    }
    Ok(())
}
