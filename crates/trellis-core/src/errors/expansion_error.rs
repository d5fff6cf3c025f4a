/// Batch-level graph expansion errors.
///
/// Missing relations for individual fragments are not errors; they surface
/// as absent markers in the returned contexts.
#[derive(Debug, thiserror::Error)]
pub enum ExpansionError {
    #[error("graph store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("expansion task failed: {reason}")]
    TaskFailed { reason: String },
}
