//! Tool boundary behaviour over an orchestrator with scripted ports.

use serde_json::{json, Value};

use test_fixtures::fakes::context;
use test_fixtures::{hit, FakeEmbedder, FakeExpansion, FakeSearch};
use trellis_core::config::RetrievalConfig;
use trellis_core::models::SearchHit;
use trellis_retrieval::RetrievalOrchestrator;
use trellis_tool::RetrievalTool;

type FakeTool = RetrievalTool<RetrievalOrchestrator<FakeEmbedder, FakeSearch, FakeExpansion>>;

fn tool_with(hits: Vec<SearchHit>, expansion: FakeExpansion) -> FakeTool {
    RetrievalTool::new(RetrievalOrchestrator::new(
        FakeEmbedder::new(8),
        FakeSearch::new(hits),
        expansion,
        RetrievalConfig::default(),
    ))
}

fn tool() -> FakeTool {
    let expansion = FakeExpansion::empty()
        .with_context("f1", context("f1", None))
        .with_context("f2", context("f2", Some("a1")))
        .with_context("f3", context("f3", Some("a1")));
    tool_with(vec![hit("f2", 0.91), hit("f1", 0.91), hit("f3", 0.60)], expansion)
}

fn code(response: &Value) -> &str {
    response["error"]["code"].as_str().unwrap_or("")
}

#[tokio::test]
async fn success_response_has_the_wire_shape() {
    let tool = tool();
    let response = tool.handle_value(json!({"query": "graph databases"})).await;

    assert_eq!(response["query"], "graph databases");
    assert_eq!(response["results_count"], 3);
    let results = response["results"].as_array().unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r["fragment_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["f1", "f2", "f3"]);

    let first = &results[0];
    assert_eq!(first["text"], "text of f1");
    assert_eq!(first["score"], 0.91);
    assert_eq!(first["document"], json!({"id": "doc-f1", "title": "Document for f1"}));
    assert!(first["author"].is_null());
    assert_eq!(first["context"], json!({"related_fragments": [], "other_documents": []}));

    assert_eq!(results[1]["author"], json!({"id": "a1", "name": "Author a1"}));
}

#[tokio::test]
async fn disabled_expansion_renders_nulls() {
    let tool = tool();
    let response = tool.handle_value(json!({"query": "q", "expandGraph": false})).await;
    for result in response["results"].as_array().unwrap() {
        assert!(result["document"].is_null());
        assert!(result["author"].is_null());
        assert!(result["context"].is_null());
    }
}

#[tokio::test]
async fn limit_is_forwarded() {
    let tool = tool();
    let response = tool.handle_value(json!({"query": "q", "limit": 2})).await;
    assert_eq!(response["results_count"], 2);
    assert_eq!(tool.retriever().search().last_limit(), 2);
}

#[tokio::test]
async fn invalid_arguments_are_protocol_errors() {
    let tool = tool();
    let cases = [
        json!({"limit": 3}),
        json!({"query": 42}),
        json!({"query": "q", "limit": 0}),
        json!({"query": "q", "limit": -1}),
        json!({"query": "q", "limit": "five"}),
        json!({"query": "q", "expandGraph": 1}),
        json!("just a string"),
    ];
    for args in cases {
        let response = tool.handle_value(args.clone()).await;
        assert_eq!(code(&response), "protocol_error", "args: {args}");
        assert!(response.get("results").is_none());
    }
    assert_eq!(tool.retriever().embedder().calls(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_protocol_error() {
    let tool = tool();
    let raw = tool.handle_json("{\"query\": ").await;
    let response: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(code(&response), "protocol_error");
}

#[tokio::test]
async fn empty_query_is_an_embedding_error_without_results() {
    let tool = tool();
    let raw = tool.handle_json(r#"{"query": ""}"#).await;
    let response: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(code(&response), "embedding_error");
    assert!(response["error"]["message"].as_str().unwrap().contains("empty"));
    assert!(response.get("results").is_none());
}

#[tokio::test]
async fn pipeline_failures_are_structured() {
    let tool = RetrievalTool::new(RetrievalOrchestrator::new(
        FakeEmbedder::new(8),
        FakeSearch::new(vec![hit("f1", 0.5)]).failing("index offline"),
        FakeExpansion::empty(),
        RetrievalConfig::default(),
    ));
    let response = tool.handle_value(json!({"query": "q"})).await;
    assert_eq!(code(&response), "search_error");

    let tool = tool_with(vec![hit("f1", 0.5)], FakeExpansion::empty().connection_lost());
    let response = tool.handle_value(json!({"query": "q"})).await;
    assert_eq!(code(&response), "expansion_error");
}

#[tokio::test]
async fn zero_hits_is_an_empty_success() {
    let tool = tool_with(Vec::new(), FakeExpansion::empty());
    let response = tool.handle_value(json!({"query": "nothing"})).await;
    assert_eq!(response["results_count"], 0);
    assert_eq!(response["results"], json!([]));
}

#[tokio::test]
async fn every_call_lands_in_the_query_log() {
    let tool = tool();
    tool.handle_value(json!({"query": "first"})).await;
    tool.handle_value(json!({"query": ""})).await;
    tool.handle_json("not json").await;

    let log = tool.query_log();
    assert_eq!(log.count(), 3);
    assert_eq!(log.error_count(), 2);
    let entries: Vec<_> = log.entries().collect();
    assert_eq!(entries[0].query, "first");
    assert_eq!(entries[0].result_count, 3);
    assert_eq!(entries[1].error_code.as_deref(), Some("embedding_error"));
    assert_eq!(entries[2].error_code.as_deref(), Some("protocol_error"));
}

#[tokio::test]
async fn query_log_is_bounded() {
    let tool = RetrievalTool::with_log_capacity(
        RetrievalOrchestrator::new(
            FakeEmbedder::new(8),
            FakeSearch::empty(),
            FakeExpansion::empty(),
            RetrievalConfig::default(),
        ),
        2,
    );
    for q in ["a", "b", "c"] {
        tool.handle_value(json!({"query": q})).await;
    }
    let log = tool.query_log();
    assert_eq!(log.count(), 2);
    assert_eq!(log.last().unwrap().query, "c");
}
