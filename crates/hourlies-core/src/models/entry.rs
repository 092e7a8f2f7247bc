//! Hourly entry data model

use crate::{Error, Result};
use chrono::{Duration, NaiveDateTime, Timelike};

/// File extension shared by all entry files
pub const ENTRY_SUFFIX: &str = ".hourlies";

/// One hourly note, stored as an individual timestamp-named file.
///
/// The timestamp carries minute precision only; the filename encodes it as
/// `YYYYMMDDHHMM`. Entries are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: NaiveDateTime,
    pub content: String,
}

impl Entry {
    /// Create an entry for `now`, truncated to the minute.
    ///
    /// Empty or whitespace-only content is rejected; the caller decides how
    /// to recover (typically by offering the previous entry for reuse).
    pub fn new(content: impl Into<String>, now: NaiveDateTime) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(Error::EmptyEntry);
        }

        let timestamp = truncate_to_minute(now)?;
        Ok(Self { timestamp, content })
    }

    /// Filename derived from the timestamp
    pub fn filename(&self) -> String {
        format!("{}{}", self.timestamp.format("%Y%m%d%H%M"), ENTRY_SUFFIX)
    }

    /// Advance the encoded timestamp by one minute.
    ///
    /// Used to sidestep filename collisions; the encoded time may end up
    /// later than the wall-clock creation time.
    pub fn bump_minute(&mut self) {
        self.timestamp += Duration::minutes(1);
    }
}

fn truncate_to_minute(now: NaiveDateTime) -> Result<NaiveDateTime> {
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| Error::InvalidData(format!("Cannot truncate timestamp {now}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_filename_truncates_seconds() {
        let entry = Entry::new("wrote tests", at(10, 30, 45)).unwrap();
        assert_eq!(entry.filename(), "202501011030.hourlies");
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(matches!(Entry::new("", at(10, 0, 0)), Err(Error::EmptyEntry)));
        assert!(matches!(
            Entry::new("   \n", at(10, 0, 0)),
            Err(Error::EmptyEntry)
        ));
    }

    #[test]
    fn test_bump_minute_crosses_hour() {
        let mut entry = Entry::new("x", at(10, 59, 0)).unwrap();
        entry.bump_minute();
        assert_eq!(entry.filename(), "202501011100.hourlies");
    }
}
