//! Errors -> `{ "error": { "code", "message" } }`.

use serde_json::{json, Value};

use trellis_core::errors::{ErrorKind, ProtocolError, RetrievalError};

pub fn error_json(code: &str, message: impl Into<String>) -> Value {
    json!({ "error": { "code": code, "message": message.into() } })
}

pub fn retrieval_error_json(err: &RetrievalError) -> Value {
    error_json(err.code(), err.to_string())
}

pub fn protocol_error_json(err: &ProtocolError) -> Value {
    error_json(ErrorKind::Protocol.code(), err.to_string())
}

/// The `error.code` of a response, if it is an error response.
pub fn error_code(response: &Value) -> Option<&str> {
    response.get("error")?.get("code")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::errors::EmbeddingError;
    use trellis_core::models::PipelineStage;

    #[test]
    fn retrieval_errors_carry_stage_and_code() {
        let err = RetrievalError::new(
            PipelineStage::Embedding,
            EmbeddingError::InvalidInput {
                reason: "query text is empty".into(),
            },
        );
        let value = retrieval_error_json(&err);
        assert_eq!(error_code(&value), Some("embedding_error"));
        let message = value["error"]["message"].as_str().unwrap();
        assert!(message.contains("embedding"));
        assert!(message.contains("empty"));
    }

    #[test]
    fn success_bodies_have_no_code() {
        assert_eq!(error_code(&json!({"query": "q", "results": []})), None);
    }
}
