//! Configuration manager

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use hourlies_core::{
    models::Config,
    storage::{init_config_dir, ConfigStorage},
    Result as CoreResult,
};

/// Config manager error
#[derive(Debug, thiserror::Error)]
pub enum ConfigManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] hourlies_core::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigManagerError>;

/// Manages application configuration
pub struct ConfigManager {
    storage: ConfigStorage,
    config: Arc<RwLock<Config>>,
}

impl ConfigManager {
    pub fn new() -> CoreResult<Self> {
        let config_dir = init_config_dir()?;
        Ok(Self::with_storage(ConfigStorage::new(config_dir)))
    }

    /// Build a manager over an explicit storage location.
    ///
    /// An unreadable or invalid stored config is recovered locally by
    /// falling back to defaults rather than failing startup.
    pub fn with_storage(storage: ConfigStorage) -> Self {
        let config = match storage.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Could not load config ({}), falling back to defaults", e);
                Config::default()
            }
        };

        Self {
            storage,
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub async fn get(&self) -> Config {
        self.config.read().await.clone()
    }

    pub async fn update(&self, config: Config) -> Result<Config> {
        // Validate config
        config
            .validate()
            .map_err(|e| ConfigManagerError::Invalid(e.to_string()))?;

        // Save to storage
        self.storage.save(&config)?;

        // Update in-memory config
        {
            let mut current = self.config.write().await;
            *current = config.clone();
        }

        Ok(config)
    }

    pub async fn set_trigger_minute(&self, trigger_minute: u32) -> Result<Config> {
        let mut config = self.get().await;
        config.trigger_minute = trigger_minute;
        self.update(config).await
    }

    pub async fn set_worklog_root(&self, worklog_root: PathBuf) -> Result<Config> {
        let mut config = self.get().await;
        config.worklog_root = worklog_root;
        self.update(config).await
    }
}
