//! Worklog file storage: day folders and hourly entry files.
//!
//! Layout on disk is `<root>/<YYYYMMDD>.<NNN>/<YYYYMMDDHHMM>.hourlies`, one
//! entry's full text per file, plain UTF-8.

use crate::{
    models::{DayFolder, Entry, ENTRY_SUFFIX},
    Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

pub struct WorklogStore {
    root: PathBuf,
}

impl WorklogStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the day folder to log into for `today`.
    ///
    /// If folders for `today` already exist, the one with the highest
    /// sequence number is adopted, so resuming a day (including after a
    /// process restart) continues the latest session rather than starting a
    /// fresh one. Otherwise the next unused sequence starting at 1 is
    /// created.
    pub fn resolve_active_day_folder(&self, today: NaiveDate) -> Result<DayFolder> {
        std::fs::create_dir_all(&self.root)?;

        let mut latest: Option<DayFolder> = None;
        for dir_entry in std::fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_dir() {
                continue;
            }
            let name = dir_entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(folder) = DayFolder::parse(&self.root, name) else {
                continue;
            };
            if folder.date != today {
                continue;
            }
            match &latest {
                Some(best) if best.sequence >= folder.sequence => {}
                _ => latest = Some(folder),
            }
        }

        if let Some(folder) = latest {
            return Ok(folder);
        }

        let mut sequence = 1;
        let mut folder = DayFolder::new(&self.root, today, sequence);
        while folder.path.exists() {
            sequence += 1;
            folder = DayFolder::new(&self.root, today, sequence);
        }
        std::fs::create_dir_all(&folder.path)?;

        Ok(folder)
    }

    /// Content of the most recent entry in `folder`, or `None`.
    ///
    /// Filenames are timestamp-derived, so the lexicographically last one is
    /// the chronologically last one. This feeds the "same as last hour"
    /// convenience only, so a missing folder or a failed read resolves to
    /// `None` instead of an error.
    pub fn most_recent_entry(&self, folder: &DayFolder) -> Option<String> {
        let entries = std::fs::read_dir(&folder.path).ok()?;

        let mut last: Option<String> = None;
        for dir_entry in entries.flatten() {
            let name = dir_entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.ends_with(ENTRY_SUFFIX) {
                continue;
            }
            match &last {
                Some(best) if best.as_str() >= name => {}
                _ => last = Some(name.to_string()),
            }
        }

        std::fs::read_to_string(folder.path.join(last?)).ok()
    }

    /// Persist `content` as a new entry file in `folder`, returning the
    /// filename used.
    ///
    /// The filename comes from `now` truncated to the minute. If that name is
    /// taken, the encoded minute is advanced until a free one is found, so an
    /// existing entry is never overwritten; the encoded time can then run
    /// ahead of the wall clock, which is accepted. On write failure the error
    /// surfaces as-is and any partial file is left in place.
    pub fn save_entry(
        &self,
        folder: &DayFolder,
        content: &str,
        now: NaiveDateTime,
    ) -> Result<String> {
        let mut entry = Entry::new(content, now)?;

        std::fs::create_dir_all(&folder.path)?;

        while folder.path.join(entry.filename()).exists() {
            entry.bump_minute();
        }

        let filename = entry.filename();
        std::fs::write(folder.path.join(&filename), &entry.content)?;

        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        date(2025, 1, 1).and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_resolve_creates_first_folder() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());

        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();
        assert_eq!(folder.dir_name(), "20250101.001");
        assert!(folder.path.is_dir());
    }

    #[test]
    fn test_resolve_adopts_highest_sequence() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("20250101.001")).unwrap();
        std::fs::create_dir(dir.path().join("20250101.002")).unwrap();

        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();
        assert_eq!(folder.dir_name(), "20250101.002");
    }

    #[test]
    fn test_resolve_ignores_other_dates_and_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("20241231.005")).unwrap();
        std::fs::write(dir.path().join("20250101.009"), "a file, not a dir").unwrap();

        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();
        assert_eq!(folder.dir_name(), "20250101.001");
    }

    #[test]
    fn test_resolve_is_idempotent_within_a_session() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());

        let first = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();
        let second = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_entry_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();

        let content = "reviewed PRs\nand wrote docs at the naïve café";
        let filename = store.save_entry(&folder, content, at(10, 30, 45)).unwrap();
        assert_eq!(filename, "202501011030.hourlies");

        let read_back = std::fs::read_to_string(folder.path.join(&filename)).unwrap();
        assert_eq!(read_back, content);
    }

    #[test]
    fn test_save_entry_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();

        let a = store.save_entry(&folder, "first", at(10, 30, 0)).unwrap();
        let b = store.save_entry(&folder, "second", at(10, 30, 10)).unwrap();
        let c = store.save_entry(&folder, "third", at(10, 30, 59)).unwrap();

        assert_eq!(a, "202501011030.hourlies");
        assert_eq!(b, "202501011031.hourlies");
        assert_eq!(c, "202501011032.hourlies");

        assert_eq!(
            std::fs::read_to_string(folder.path.join(&a)).unwrap(),
            "first"
        );
    }

    #[test]
    fn test_save_entry_rejects_empty_content() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();

        let result = store.save_entry(&folder, "  \n", at(10, 0, 0));
        assert!(matches!(result, Err(Error::EmptyEntry)));
    }

    #[test]
    fn test_save_entry_creates_missing_folder() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = DayFolder::new(dir.path(), date(2025, 1, 1), 1);
        assert!(!folder.path.exists());

        store.save_entry(&folder, "late start", at(9, 0, 0)).unwrap();
        assert!(folder.path.join("202501010900.hourlies").exists());
    }

    #[test]
    fn test_most_recent_entry_picks_latest() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());
        let folder = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();

        std::fs::write(folder.path.join("202501011200.hourlies"), "noon").unwrap();
        std::fs::write(folder.path.join("202501011300.hourlies"), "one pm").unwrap();
        std::fs::write(folder.path.join("notes.txt"), "ignored").unwrap();

        assert_eq!(store.most_recent_entry(&folder).as_deref(), Some("one pm"));
    }

    #[test]
    fn test_most_recent_entry_absent_cases() {
        let dir = TempDir::new().unwrap();
        let store = WorklogStore::new(dir.path().to_path_buf());

        let missing = DayFolder::new(dir.path(), date(2025, 1, 1), 7);
        assert_eq!(store.most_recent_entry(&missing), None);

        let empty = store.resolve_active_day_folder(date(2025, 1, 1)).unwrap();
        assert_eq!(store.most_recent_entry(&empty), None);
    }
}
