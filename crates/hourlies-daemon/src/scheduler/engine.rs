//! Hourly scheduler: computes wake-up times and runs the background wait loop.
//!
//! The loop never touches presentation or file state. It only posts
//! [`TriggerEvent`]s onto an mpsc queue owned by the foreground context, which
//! decides when and how to prompt the user.

use chrono::{DateTime, Duration, Local, TimeZone, Timelike};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::events::TriggerEvent;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Trigger minute must be 0-59, got {0}")]
    InvalidTriggerMinute(u32),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Fires once per hour at a configured minute-of-hour.
///
/// `start` spawns a single background wait loop and keeps its handle;
/// `stop` marks the state `Stopped` and aborts the parked task, so at most
/// one loop exists at any time and a later restart cannot race a loop left
/// over from the previous run. The loop also re-checks state after every
/// wake before firing.
pub struct HourlyScheduler {
    inner: Arc<RwLock<Inner>>,
    event_tx: mpsc::UnboundedSender<TriggerEvent>,
}

struct Inner {
    state: SchedulerState,
    task: Option<JoinHandle<()>>,
}

impl HourlyScheduler {
    pub fn new(event_tx: mpsc::UnboundedSender<TriggerEvent>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: SchedulerState::Idle,
                task: None,
            })),
            event_tx,
        }
    }

    pub async fn state(&self) -> SchedulerState {
        self.inner.read().await.state
    }

    /// Start the wait loop. No-op while already running; a stopped scheduler
    /// may be started again (ending a day and starting a new one).
    pub async fn start(&self, trigger_minute: u32) -> Result<()> {
        if trigger_minute > 59 {
            return Err(SchedulerError::InvalidTriggerMinute(trigger_minute));
        }

        let mut inner = self.inner.write().await;
        if inner.state == SchedulerState::Running {
            return Ok(());
        }
        inner.state = SchedulerState::Running;

        // A stopped loop could still be parked in its final sleep; it must
        // not wake into the new run.
        if let Some(task) = inner.task.take() {
            task.abort();
        }

        let shared = Arc::clone(&self.inner);
        let event_tx = self.event_tx.clone();
        inner.task = Some(tokio::spawn(run_wait_loop(shared, event_tx, trigger_minute)));

        Ok(())
    }

    /// Prevent further triggers and cancel the wait task.
    pub async fn stop(&self) {
        let mut inner = self.inner.write().await;
        if inner.state == SchedulerState::Running {
            inner.state = SchedulerState::Stopped;
        }
        if let Some(task) = inner.task.take() {
            task.abort();
        }
    }
}

async fn run_wait_loop(
    shared: Arc<RwLock<Inner>>,
    event_tx: mpsc::UnboundedSender<TriggerEvent>,
    trigger_minute: u32,
) {
    loop {
        if shared.read().await.state != SchedulerState::Running {
            break;
        }

        // Recompute from the wall clock every iteration instead of adding a
        // fixed hourly increment, so a host that slept or hibernated neither
        // double-fires nor drifts.
        let now = Local::now();
        let Some(next) = next_trigger(now, trigger_minute) else {
            tracing::error!("Cannot place minute {} on the current local clock", trigger_minute);
            shared.write().await.state = SchedulerState::Stopped;
            break;
        };

        let wait = (next - now).to_std().unwrap_or_default();
        tracing::debug!("Next trigger at {}, sleeping {:?}", next, wait);
        sleep(wait).await;

        if shared.read().await.state != SchedulerState::Running {
            break;
        }

        if event_tx.send(TriggerEvent::fired(next)).is_err() {
            // Foreground queue is gone; nothing left to notify.
            tracing::debug!("Trigger receiver dropped, exiting wait loop");
            break;
        }
    }
}

/// Next instant whose minute-of-hour is `trigger_minute` with zero seconds,
/// strictly in the future. A boundary already reached within the current hour
/// rolls over to the same minute of the next hour.
///
/// Returns `None` when the minute cannot be placed on the clock, which only
/// happens around pathological local-time transitions.
pub fn next_trigger<Tz: TimeZone>(now: DateTime<Tz>, trigger_minute: u32) -> Option<DateTime<Tz>> {
    let candidate = now
        .with_minute(trigger_minute)?
        .with_second(0)?
        .with_nanosecond(0)?;

    if candidate <= now {
        candidate.checked_add_signed(Duration::hours(1))
    } else {
        Some(candidate)
    }
}
