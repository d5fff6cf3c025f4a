/// Malformed requests at the tool boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed request: {reason}")]
    MalformedRequest { reason: String },

    #[error("missing field: {field}")]
    MissingField { field: String },

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("unknown method: {method}")]
    UnknownMethod { method: String },
}
