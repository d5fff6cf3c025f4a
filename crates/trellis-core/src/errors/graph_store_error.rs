/// Errors from a single relation lookup against the graph store.
#[derive(Debug, thiserror::Error)]
pub enum GraphStoreError {
    /// The store connection itself is gone. Aborts the whole expansion batch.
    #[error("graph store connection lost: {reason}")]
    ConnectionLost { reason: String },

    /// One lookup failed. Recovered per fragment.
    #[error("lookup failed for {entity_id}: {reason}")]
    LookupFailed { entity_id: String, reason: String },
}

impl GraphStoreError {
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, GraphStoreError::ConnectionLost { .. })
    }
}
