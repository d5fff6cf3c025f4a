use trellis_core::errors::*;
use trellis_core::models::PipelineStage;

#[test]
fn embedding_error_invalid_input_carries_reason() {
    let err = EmbeddingError::InvalidInput {
        reason: "query text is empty".into(),
    };
    assert!(err.to_string().contains("query text is empty"));
}

#[test]
fn search_error_index_not_found_carries_name() {
    let err = SearchError::IndexNotFound {
        index: "fragments_v2".into(),
    };
    assert!(err.to_string().contains("fragments_v2"));
}

#[test]
fn timeout_error_names_stage() {
    let err = TimeoutError {
        stage: PipelineStage::Expanding,
        elapsed_ms: 250,
    };
    let msg = err.to_string();
    assert!(msg.contains("expanding"));
    assert!(msg.contains("250"));
}

#[test]
fn graph_store_error_classifies_connection_failures() {
    let lost = GraphStoreError::ConnectionLost {
        reason: "socket closed".into(),
    };
    let lookup = GraphStoreError::LookupFailed {
        entity_id: "doc-1".into(),
        reason: "row decode".into(),
    };
    assert!(lost.is_connection_failure());
    assert!(!lookup.is_connection_failure());
}

// --- RetrievalError wrapping ---

#[test]
fn retrieval_error_keeps_stage_and_kind() {
    let err = RetrievalError::new(
        PipelineStage::Embedding,
        EmbeddingError::InvalidInput {
            reason: "empty".into(),
        },
    );
    assert_eq!(err.stage, PipelineStage::Embedding);
    assert_eq!(err.kind(), ErrorKind::Embedding);
    assert_eq!(err.code(), "embedding_error");
    assert!(err.to_string().contains("embedding"));
    assert_eq!(err.message(), "invalid input: empty");
}

#[test]
fn retrieval_error_timeout_kind() {
    let err = RetrievalError::new(
        PipelineStage::Searching,
        TimeoutError {
            stage: PipelineStage::Searching,
            elapsed_ms: 10,
        },
    );
    assert!(err.is_timeout());
    assert_eq!(err.code(), "timeout");
}

#[test]
fn retrieval_error_exposes_source_chain() {
    use std::error::Error;
    let err = RetrievalError::new(
        PipelineStage::Searching,
        SearchError::StoreUnavailable {
            reason: "pool poisoned".into(),
        },
    );
    let source = err.source().expect("source present");
    assert!(source.to_string().contains("pool poisoned"));
}

// --- From impls ---

#[test]
fn storage_error_converts_to_trellis_error() {
    let storage_err = StorageError::SqliteError {
        message: "disk full".into(),
    };
    let err: TrellisError = storage_err.into();
    assert!(matches!(err, TrellisError::StorageError(_)));
    assert_eq!(err.kind().code(), "storage_error");
}

#[test]
fn retrieval_error_converts_and_keeps_kind() {
    let inner = RetrievalError::new(
        PipelineStage::Expanding,
        ExpansionError::StoreUnavailable {
            reason: "gone".into(),
        },
    );
    let err: TrellisError = inner.into();
    assert_eq!(err.kind(), ErrorKind::Expansion);
}

#[test]
fn every_kind_has_distinct_code() {
    let kinds = [
        ErrorKind::Embedding,
        ErrorKind::Search,
        ErrorKind::Expansion,
        ErrorKind::Aggregation,
        ErrorKind::Timeout,
        ErrorKind::Protocol,
        ErrorKind::Storage,
        ErrorKind::Config,
    ];
    let codes: std::collections::HashSet<&str> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
}
