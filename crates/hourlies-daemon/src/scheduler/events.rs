//! Scheduler events

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Event posted onto the foreground queue when the hourly reminder fires
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerEvent {
    /// The minute boundary this trigger was computed for
    pub scheduled_for: DateTime<Local>,
    /// When the wait loop actually woke and fired; later than
    /// `scheduled_for` when the host slept through the deadline
    pub fired_at: DateTime<Local>,
}

impl TriggerEvent {
    pub fn new(scheduled_for: DateTime<Local>, fired_at: DateTime<Local>) -> Self {
        Self {
            scheduled_for,
            fired_at,
        }
    }

    /// Create an event firing now for the given boundary
    pub fn fired(scheduled_for: DateTime<Local>) -> Self {
        Self::new(scheduled_for, Local::now())
    }
}
