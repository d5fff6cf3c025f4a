use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;

use trellis_tool::{serve, RetrievalTool};

use crate::exit::CliExitCode;
use crate::runtime::Runtime;

/// Stdio tool server. Returns when stdin closes.
pub async fn run(runtime: &Runtime) -> anyhow::Result<CliExitCode> {
    let tool = RetrievalTool::with_log_capacity(
        runtime.pipeline(),
        runtime.config().observability.query_log_capacity,
    );
    let answered = serve(&tool, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("tool server I/O failed")?;

    let log = tool.query_log();
    info!(
        answered,
        calls = log.count(),
        errors = log.error_count(),
        avg_latency_ms = log.avg_latency().as_millis() as u64,
        p95_latency_ms = log.latency_percentile(0.95).as_millis() as u64,
        "session summary"
    );
    Ok(CliExitCode::Success)
}
