use crate::models::PipelineStage;

/// Deadline expiry at some pipeline stage.
#[derive(Debug, Clone, thiserror::Error)]
#[error("deadline exceeded during {stage} after {elapsed_ms} ms")]
pub struct TimeoutError {
    pub stage: PipelineStage,
    pub elapsed_ms: u64,
}
