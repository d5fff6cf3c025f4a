//! Tests for tracing setup and span macros.

use std::sync::Mutex;

use trellis_core::config::ObservabilityConfig;
use trellis_observability::tracing_setup::spans::names;
use trellis_observability::tracing_setup::{resolve_filter, LOG_ENV};
use trellis_observability::{embedding_span, expansion_span, init_tracing, init_tracing_with, retrieval_span, search_span};

/// Serializes tests that touch the environment.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_is_idempotent() {
    let _lock = ENV_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing_with(&ObservabilityConfig::default(), Some("debug"));
}

#[test]
fn invalid_directive_falls_back() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let filter = resolve_filter(Some("trellis=loudest"));
    assert_eq!(filter.to_string(), "info");
}

#[test]
fn env_directive_is_read() {
    let _lock = ENV_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "trellis_retrieval=debug");
    let filter = resolve_filter(None);
    std::env::remove_var(LOG_ENV);
    assert!(filter.to_string().contains("trellis_retrieval=debug"));
}

#[test]
fn span_macros_expand() {
    let _lock = ENV_MUTEX.lock().unwrap();
    init_tracing();
    let span = retrieval_span!("query text", 5usize, true);
    let _entered = span.enter();
    let _ = embedding_span!("model", 384usize);
    let _ = search_span!("fragment_embeddings", 5usize);
    let _ = expansion_span!(3usize);
    assert_eq!(names::RETRIEVAL, "trellis.retrieval");
    assert_eq!(names::EXPANSION, "trellis.expansion");
}
