//! Config file persistence
//!
//! One pretty-printed JSON file, `config.json`, kept under the config
//! directory. A missing file is seeded with defaults on first load, and keys
//! missing from an older file fall back to their defaults through the
//! model's serde defaults. Malformed JSON surfaces as an error; deciding
//! whether to recover is the caller's call.

use crate::{models::Config, Result};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn load(&self) -> Result<Config> {
        let path = self.config_path();
        if !path.exists() {
            return self.seed_defaults();
        }

        let raw = std::fs::read_to_string(&path)?;
        if raw.trim().is_empty() {
            // A zero-byte file, e.g. from an interrupted write
            return self.seed_defaults();
        }

        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::write(self.config_path(), serde_json::to_string_pretty(config)?)?;
        Ok(())
    }

    fn seed_defaults(&self) -> Result<Config> {
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }
}
