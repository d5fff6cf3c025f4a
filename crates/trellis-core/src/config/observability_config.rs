use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging and query-log configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directive when `TRELLIS_LOG` is unset.
    pub log_level: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
    /// Entries retained by the tool server's query log.
    pub query_log_capacity: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            query_log_capacity: defaults::DEFAULT_QUERY_LOG_CAPACITY,
        }
    }
}
