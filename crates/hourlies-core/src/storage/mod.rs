pub mod config;
pub mod worklog;

pub use config::ConfigStorage;
pub use worklog::WorklogStore;

use std::path::PathBuf;

pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .expect("Could not find data directory")
        .join("hourlies")
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .expect("Could not find config directory")
        .join("hourlies")
}

/// Default location for day folders when the config does not override it
pub fn default_worklog_root() -> PathBuf {
    get_data_dir().join("worklog")
}

pub fn init_config_dir() -> crate::Result<PathBuf> {
    let config_dir = get_config_dir();
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}

pub fn init_data_dir() -> crate::Result<PathBuf> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}
