//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Keys absent from a stored config pick up their defaults on load, so a
/// file written by an older build keeps working.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root directory that holds all day folders
    pub worklog_root: PathBuf,
    /// Minute of the hour (0-59) at which the reminder fires
    pub trigger_minute: u32,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.trigger_minute > 59 {
            return Err(Error::Validation(format!(
                "Trigger minute must be 0-59, got {}",
                self.trigger_minute
            )));
        }

        if self.worklog_root.as_os_str().is_empty() {
            return Err(Error::Validation(
                "Worklog root cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worklog_root: crate::storage::default_worklog_root(),
            trigger_minute: 0,
        }
    }
}
