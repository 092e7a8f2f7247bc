//! Day folder data model

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// One logging session for a calendar date, named `<YYYYMMDD>.<NNN>`.
///
/// The sequence number disambiguates multiple sessions started on the same
/// date. Folders are created by the store and never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFolder {
    pub date: NaiveDate,
    pub sequence: u32,
    pub path: PathBuf,
}

impl DayFolder {
    /// Build the folder for `date`/`sequence` under `root`
    pub fn new(root: &Path, date: NaiveDate, sequence: u32) -> Self {
        let name = Self::format_name(date, sequence);
        Self {
            date,
            sequence,
            path: root.join(name),
        }
    }

    /// Directory name for a date and sequence, sequence zero-padded to 3
    pub fn format_name(date: NaiveDate, sequence: u32) -> String {
        format!("{}.{:03}", date.format("%Y%m%d"), sequence)
    }

    /// The folder's directory name
    pub fn dir_name(&self) -> String {
        Self::format_name(self.date, self.sequence)
    }

    /// Parse a directory name of the form `<YYYYMMDD>.<NNN>`
    pub fn parse(root: &Path, name: &str) -> Option<Self> {
        let (date_part, seq_part) = name.split_once('.')?;
        let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
        if seq_part.len() < 3 || !seq_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence: u32 = seq_part.parse().ok()?;
        if sequence == 0 {
            return None;
        }
        Some(Self::new(root, date, sequence))
    }
}
