//! Line-delimited server loop.

use serde_json::{json, Value};

use test_fixtures::{hit, FakeEmbedder, FakeExpansion, FakeSearch};
use trellis_core::config::RetrievalConfig;
use trellis_retrieval::RetrievalOrchestrator;
use trellis_tool::{serve, RetrievalTool};

type FakeTool = RetrievalTool<RetrievalOrchestrator<FakeEmbedder, FakeSearch, FakeExpansion>>;

fn tool() -> FakeTool {
    RetrievalTool::new(RetrievalOrchestrator::new(
        FakeEmbedder::new(8),
        FakeSearch::new(vec![hit("f1", 0.9), hit("f2", 0.8)]),
        FakeExpansion::uniform(&["f1", "f2"]),
        RetrievalConfig::default(),
    ))
}

async fn run(tool: &FakeTool, input: &str) -> (usize, Vec<Value>) {
    let mut output = Vec::new();
    let answered = serve(tool, input.as_bytes(), &mut output).await.unwrap();
    let replies = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (answered, replies)
}

#[tokio::test]
async fn replies_echo_ids_in_order() {
    let tool = tool();
    let input = [
        json!({"id": 1, "method": "describe"}).to_string(),
        json!({"id": "two", "method": "call", "params": {"query": "q", "limit": 1}}).to_string(),
    ]
    .join("\n");

    let (answered, replies) = run(&tool, &input).await;
    assert_eq!(answered, 2);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[0]["result"]["name"], "graph_context_search");
    assert_eq!(replies[1]["id"], "two");
    assert_eq!(replies[1]["result"]["results_count"], 1);
    assert_eq!(replies[1]["result"]["results"][0]["fragment_id"], "f1");
}

#[tokio::test]
async fn bad_lines_do_not_stop_the_loop() {
    let tool = tool();
    let input = [
        "this is not json".to_string(),
        "[1, 2, 3]".to_string(),
        String::new(),
        json!({"id": 3, "method": "explode"}).to_string(),
        json!({"id": 4}).to_string(),
        json!({"id": 5, "method": "call"}).to_string(),
        json!({"id": 6, "method": "call", "params": {"query": ""}}).to_string(),
        json!({"id": 7, "method": "call", "params": {"query": "still serving"}}).to_string(),
    ]
    .join("\n");

    let (answered, replies) = run(&tool, &input).await;
    assert_eq!(answered, 7);

    assert!(replies[0]["id"].is_null());
    assert_eq!(replies[0]["error"]["code"], "protocol_error");
    assert_eq!(replies[1]["error"]["code"], "protocol_error");
    assert_eq!(replies[2]["id"], 3);
    assert!(replies[2]["error"]["message"].as_str().unwrap().contains("explode"));
    assert_eq!(replies[3]["error"]["code"], "protocol_error");
    assert_eq!(replies[4]["error"]["code"], "protocol_error");
    assert_eq!(replies[5]["id"], 6);
    assert_eq!(replies[5]["error"]["code"], "embedding_error");
    assert_eq!(replies[6]["id"], 7);
    assert_eq!(replies[6]["result"]["results_count"], 2);
}

#[tokio::test]
async fn empty_input_answers_nothing() {
    let tool = tool();
    let (answered, replies) = run(&tool, "").await;
    assert_eq!(answered, 0);
    assert!(replies.is_empty());
}
