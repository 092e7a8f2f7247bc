pub mod engine;
pub mod events;

pub use engine::{next_trigger, HourlyScheduler, SchedulerError, SchedulerState};
pub use events::TriggerEvent;
