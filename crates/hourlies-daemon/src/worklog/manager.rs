//! Worklog manager - owns the process's single active day folder

use std::sync::Arc;
use tokio::sync::RwLock;

use chrono::{NaiveDate, NaiveDateTime};
use hourlies_core::{
    models::DayFolder,
    storage::WorklogStore,
};

/// Worklog manager error
#[derive(Debug, thiserror::Error)]
pub enum WorklogManagerError {
    #[error("No active day folder; start a new day first")]
    NoActiveDay,

    #[error("No entry text and no previous entry to reuse")]
    NoPreviousEntry,

    #[error("Storage error: {0}")]
    Storage(#[from] hourlies_core::Error),
}

pub type Result<T> = std::result::Result<T, WorklogManagerError>;

/// Ties the store to the one day folder this process is logging into.
///
/// The active folder is explicit application state handed to whoever needs
/// it; there is no process-wide singleton. All file operations run on the
/// foreground context, one at a time.
pub struct WorklogManager {
    store: WorklogStore,
    active: Arc<RwLock<Option<DayFolder>>>,
}

impl WorklogManager {
    pub fn new(store: WorklogStore) -> Self {
        Self {
            store,
            active: Arc::new(RwLock::new(None)),
        }
    }

    pub fn store(&self) -> &WorklogStore {
        &self.store
    }

    /// Resolve and adopt the day folder for `today`.
    ///
    /// Resumes the latest existing folder for the date when one exists,
    /// matching the resolve semantics of the store.
    pub async fn start_new_day(&self, today: NaiveDate) -> Result<DayFolder> {
        let folder = self.store.resolve_active_day_folder(today)?;

        let mut active = self.active.write().await;
        *active = Some(folder.clone());

        Ok(folder)
    }

    pub async fn active_folder(&self) -> Option<DayFolder> {
        self.active.read().await.clone()
    }

    /// Release the active folder, returning it if one was set. Entry files
    /// already written stay untouched.
    pub async fn end_of_day(&self) -> Option<DayFolder> {
        let mut active = self.active.write().await;
        active.take()
    }

    /// Save `content` into the active day folder, returning the filename used
    pub async fn save_entry(&self, content: &str, now: NaiveDateTime) -> Result<String> {
        let active = self.active.read().await;
        let folder = active.as_ref().ok_or(WorklogManagerError::NoActiveDay)?;
        Ok(self.store.save_entry(folder, content, now)?)
    }

    /// Most recent entry of the active day folder, if any
    pub async fn most_recent_entry(&self) -> Option<String> {
        let active = self.active.read().await;
        let folder = active.as_ref()?;
        self.store.most_recent_entry(folder)
    }

    /// Decide what a submission saves: non-blank input wins, blank input
    /// falls back to the previous entry ("same as last hour"), and with no
    /// previous entry the caller must re-prompt.
    pub async fn resolve_content(&self, input: &str) -> Result<String> {
        if !input.trim().is_empty() {
            return Ok(input.to_string());
        }

        self.most_recent_entry()
            .await
            .ok_or(WorklogManagerError::NoPreviousEntry)
    }
}
