//! Watchlist storage configuration.

use serde::Deserialize;

/// Which watchlist store to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file through Diesel.
    #[default]
    Sqlite,
    /// Process memory; lost on restart.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "tickerbot.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database: default_database_path(),
        }
    }
}
