//! Tracing initialization.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use trellis_core::config::ObservabilityConfig;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "TRELLIS_LOG";

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Initialize human-readable logging to stderr.
///
/// Reads `TRELLIS_LOG` (e.g. `TRELLIS_LOG=trellis_retrieval=debug,info`),
/// falling back to `info` when unset or invalid. Idempotent.
pub fn init_tracing() {
    install(None, false);
}

/// Initialize JSON logging to stderr. Same filter rules as [`init_tracing`].
pub fn init_tracing_json() {
    install(None, true);
}

/// Initialize from config. An explicit `filter` (e.g. a CLI flag) wins over
/// `TRELLIS_LOG`, which wins over `config.log_level`.
pub fn init_tracing_with(config: &ObservabilityConfig, filter: Option<&str>) {
    let directive = filter
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| config.log_level.clone());
    install(Some(directive), config.json_logs);
}

/// Resolve a directive, falling back to the default on a parse error.
pub fn resolve_filter(directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

fn install(directive: Option<String>, json: bool) {
    INIT.call_once(|| {
        let filter = resolve_filter(directive.as_deref());
        let registry = tracing_subscriber::registry().with(filter);
        // try_init: a host process may already own the global subscriber.
        let _ = if json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .try_init()
        };
    });
}
