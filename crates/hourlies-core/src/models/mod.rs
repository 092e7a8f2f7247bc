pub mod config;
pub mod day_folder;
pub mod entry;

pub use config::Config;
pub use day_folder::DayFolder;
pub use entry::{Entry, ENTRY_SUFFIX};
