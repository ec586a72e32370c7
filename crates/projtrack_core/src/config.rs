//! Application configuration.
//!
//! # Responsibility
//! - Hold the data directory and derive store/log locations from it.
//!
//! # Invariants
//! - Configuration is an explicit value passed at startup; there is no
//!   global mutable state to reconfigure later.

use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "projects.db";
const LOG_DIR_NAME: &str = "logs";

/// Startup configuration for the tracker core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory owning the database file and log output.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Creates a configuration rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the SQLite database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

impl AsRef<Path> for AppConfig {
    fn as_ref(&self) -> &Path {
        &self.data_dir
    }
}
