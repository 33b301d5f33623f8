//! Application configuration.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory (see [`DataStorage`]). A missing file is not an
//! error: every section falls back to its defaults, so the store works with
//! no setup at all.
//!
//! ```rust,no_run
//! use todolist::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db_config = config.db_config()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DbConfig;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error_anyhow};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Database file and connection tuning.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// File name inside the data directory, or an absolute path.
    pub file: String,

    /// Value for `PRAGMA journal_mode`.
    pub journal_mode: String,

    /// Value for `PRAGMA synchronous`.
    pub synchronous: String,

    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,

    /// Value for `PRAGMA foreign_keys`.
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            file: "todos.db".to_string(),
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Reads `config.json` from the data directory, or returns defaults when it does not exist.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new().base_path().join(CONFIG_FILE_NAME))
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        msg_debug!(Message::ConfigLoaded(path.display().to_string()));
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Connection settings with the database file resolved against the default data directory.
    pub fn db_config(&self) -> Result<DbConfig> {
        self.db_config_in(&DataStorage::new())
    }

    pub fn db_config_in(&self, storage: &DataStorage) -> Result<DbConfig> {
        let file = PathBuf::from(&self.database.file);
        let path = if file.is_absolute() { file } else { storage.get_path(&self.database.file)? };
        Ok(self.db_config_at(path))
    }

    /// Connection settings for an explicit database file. Nothing is created on disk.
    pub fn db_config_at(&self, path: impl Into<PathBuf>) -> DbConfig {
        DbConfig {
            path: path.into(),
            journal_mode: self.database.journal_mode.clone(),
            synchronous: self.database.synchronous.clone(),
            busy_timeout: Duration::from_millis(self.database.busy_timeout_ms),
            foreign_keys: self.database.foreign_keys,
        }
    }
}
