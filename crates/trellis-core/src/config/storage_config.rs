use serde::{Deserialize, Serialize};

use super::defaults;

/// Connection parameters for the SQLite-backed store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file. `None` opens a private in-memory store.
    pub db_path: Option<String>,
    /// Number of pooled read connections.
    pub read_pool_size: usize,
    /// SQLite busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
