//! [`RetrievalResult`] -> tool response.

use serde_json::{json, Value};

use trellis_core::models::{Relation, RetrievalResult, RetrievedFragment};

/// Success response: `query`, `results_count`, `results`.
pub fn result_to_json(result: &RetrievalResult) -> Value {
    let results: Vec<Value> = result.results.iter().map(fragment_to_json).collect();
    json!({
        "query": result.query,
        "results_count": results.len(),
        "results": results,
    })
}

fn fragment_to_json(fragment: &RetrievedFragment) -> Value {
    json!({
        "fragment_id": fragment.fragment_id,
        "text": fragment.text,
        "score": fragment.score,
        "document": relation_to_json(&fragment.document, |d| json!({"id": d.id, "title": d.title})),
        "author": relation_to_json(&fragment.author, |a| json!({"id": a.id, "name": a.name})),
        "context": fragment.context.as_ref().map(|ctx| json!({
            "related_fragments": ctx
                .related_fragments
                .iter()
                .map(|f| json!({"id": f.id, "text": f.text}))
                .collect::<Vec<_>>(),
            "other_documents": ctx
                .other_documents
                .iter()
                .map(|d| json!({"id": d.id, "title": d.title}))
                .collect::<Vec<_>>(),
        })),
    })
}

/// Anything but `Found` renders as `null`.
fn relation_to_json<T>(relation: &Relation<T>, render: impl Fn(&T) -> Value) -> Value {
    relation.found().map(render).unwrap_or(Value::Null)
}
