//! Hourlies Daemon Library
//!
//! Scheduling and worklog session management exposed as a library for testing.

pub mod config;
pub mod scheduler;
pub mod worklog;

pub use config::ConfigManager;
pub use scheduler::{HourlyScheduler, SchedulerState, TriggerEvent};
pub use worklog::WorklogManager;
