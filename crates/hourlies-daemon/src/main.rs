//! Hourlies Daemon
//!
//! Headless reminder daemon: fires once per hour at the configured minute and
//! records worklog entries submitted on stdin. Acts as the reference
//! presentation collaborator for the core; a GUI front end would drive the
//! same managers.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use hourlies_core::storage::{init_data_dir, WorklogStore};
use hourlies_daemon::{ConfigManager, HourlyScheduler, TriggerEvent, WorklogManager};
use std::fs;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "hourliesd")]
#[command(about = "Hourlies daemon - hourly worklog reminder backend", long_about = None)]
struct Args {
    /// Root directory for day folders (overrides the stored config)
    #[arg(long)]
    worklog_root: Option<PathBuf>,

    /// Minute of the hour at which the reminder fires (overrides the stored config)
    #[arg(long)]
    trigger_minute: Option<u32>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize data directory and log file
    let data_dir = init_data_dir()?;
    let log_file_path = data_dir.join("daemon.log");

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    // Initialize logging - write to both file and stdout
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let stdout_writer = std::io::stdout.with_max_level(tracing::Level::INFO);
    let file_writer = log_file.with_max_level(tracing::Level::DEBUG);

    tracing_subscriber::fmt()
        .with_writer(stdout_writer.and(file_writer))
        .with_env_filter(&args.log_level)
        .with_ansi(false) // No color codes in log file
        .init();

    tracing::info!("Hourlies daemon starting...");
    tracing::info!("Log file: {}", log_file_path.display());

    let config_manager = ConfigManager::new()?;
    let mut config = config_manager.get().await;
    if let Some(root) = args.worklog_root {
        config.worklog_root = root;
    }
    if let Some(minute) = args.trigger_minute {
        config.trigger_minute = minute;
    }
    config.validate()?;
    tracing::info!("Worklog root: {}", config.worklog_root.display());

    let worklog = WorklogManager::new(WorklogStore::new(config.worklog_root.clone()));
    let folder = worklog.start_new_day(Local::now().date_naive()).await?;
    tracing::info!("Logging to: {}", folder.dir_name());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let scheduler = HourlyScheduler::new(event_tx);
    scheduler.start(config.trigger_minute).await?;
    tracing::info!(
        "Reminder scheduled at minute {} of every hour",
        config.trigger_minute
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    // Foreground event loop: triggers and entry submissions both land here,
    // so file operations never overlap.
    loop {
        tokio::select! {
            Some(event) = event_rx.recv() => {
                handle_trigger(&worklog, &event).await;
            }
            line = lines.next_line() => {
                match line? {
                    Some(text) => handle_submission(&worklog, &text).await,
                    None => break, // stdin closed
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    tracing::info!("Shutting down...");
    scheduler.stop().await;
    if let Some(folder) = worklog.end_of_day().await {
        tracing::info!("Ended day {}", folder.dir_name());
    }

    Ok(())
}

async fn handle_trigger(worklog: &WorklogManager, event: &TriggerEvent) {
    tracing::info!(
        "What did you do in the last hour? (scheduled for {}, type it and press enter; \
         an empty line reuses the previous entry)",
        event.scheduled_for.format("%H:%M")
    );
    if worklog.most_recent_entry().await.is_some() {
        tracing::info!("A previous entry exists and can be reused");
    }
}

async fn handle_submission(worklog: &WorklogManager, text: &str) {
    let content = match worklog.resolve_content(text).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Nothing saved: {}", e);
            return;
        }
    };

    match worklog.save_entry(&content, Local::now().naive_local()).await {
        Ok(filename) => tracing::info!("Saved entry {}", filename),
        Err(e) => tracing::error!("Failed to save entry: {}", e),
    }
}
