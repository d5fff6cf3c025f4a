use trellis_core::config::*;
use trellis_core::TrellisConfig;

#[test]
fn defaults_are_valid() {
    let config = TrellisConfig::default();
    config.validate().unwrap();
    assert_eq!(config.retrieval.default_limit, defaults::DEFAULT_RESULT_LIMIT);
    assert_eq!(config.embedding.dimensions, 384);
    assert!(config.retrieval.expand_graph_default);
    assert!(config.retrieval.deadline().is_none());
}

#[test]
fn partial_toml_fills_defaults() {
    let toml = r#"
[embedding]
dimensions = 128

[graph]
max_sibling_fragments = 5
"#;
    let config = TrellisConfig::from_toml(toml).unwrap();
    assert_eq!(config.embedding.dimensions, 128);
    assert_eq!(config.embedding.model_name, defaults::DEFAULT_EMBEDDING_MODEL);
    assert_eq!(config.graph.max_sibling_fragments, 5);
    assert_eq!(config.graph.max_other_documents, defaults::DEFAULT_MAX_OTHER_DOCUMENTS);
    assert_eq!(config.search.index_name, defaults::DEFAULT_INDEX_NAME);
}

#[test]
fn deadline_fields_parse_as_durations() {
    let toml = r#"
[retrieval]
deadline_ms = 1500
expansion_timeout_ms = 200
"#;
    let config = TrellisConfig::from_toml(toml).unwrap();
    assert_eq!(
        config.retrieval.deadline(),
        Some(std::time::Duration::from_millis(1500))
    );
    assert_eq!(
        config.retrieval.expansion_timeout(),
        Some(std::time::Duration::from_millis(200))
    );
}

#[test]
fn empty_toml_is_default() {
    let config = TrellisConfig::from_toml("").unwrap();
    assert_eq!(config, TrellisConfig::default());
}

#[test]
fn toml_roundtrip_preserves_values() {
    let mut config = TrellisConfig::default();
    config.search.index_name = "docs_idx".to_string();
    config.retrieval.deadline_ms = Some(900);
    let text = config.to_toml().unwrap();
    let back = TrellisConfig::from_toml(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn rejects_default_limit_above_max() {
    let toml = r#"
[retrieval]
default_limit = 20
max_limit = 10
"#;
    let err = TrellisConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("default_limit"));
}

#[test]
fn rejects_zero_dimensions() {
    let err = TrellisConfig::from_toml("[embedding]\ndimensions = 0\n").unwrap_err();
    assert!(err.to_string().contains("dimensions"));
}

#[test]
fn rejects_zero_in_flight() {
    let err = TrellisConfig::from_toml("[graph]\nmax_in_flight = 0\n").unwrap_err();
    assert!(err.to_string().contains("max_in_flight"));
}

#[test]
fn malformed_toml_is_config_error() {
    let err = TrellisConfig::from_toml("[retrieval\nmax_limit = ").unwrap_err();
    assert_eq!(err.kind().code(), "config_error");
}
