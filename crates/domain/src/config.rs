use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATABASE_FILE: &str = "ifsc.db";

/// Returns the default data path based on build profile.
/// - Debug builds: `./data` (relative to project directory)
/// - Release builds: `/data` (absolute path for production)
pub fn default_data_path() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("./data")
    }

    #[cfg(not(debug_assertions))]
    {
        PathBuf::from("/data")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_path: PathBuf,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn new(data_path: impl AsRef<Path>) -> Self {
        let data_path = data_path.as_ref().to_path_buf();
        let database_url = format!(
            "sqlite:{}?mode=rwc",
            data_path.join(DATABASE_FILE).display()
        );
        Self {
            data_path,
            database_url,
            max_connections: 5,
        }
    }

    /// Build from `DATA_PATH` / `DATABASE_URL`, falling back to the profile default.
    pub fn from_env() -> Self {
        let data_path = std::env::var("DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        let config = Self::new(data_path);
        match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => config.with_database_url(url),
            _ => config,
        }
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// True when the database lives in a file under `data_path`
    pub fn uses_data_path(&self) -> bool {
        self.database_url.contains(&self.data_path.display().to_string())
    }
}
