use std::cmp::Ordering;

use trellis_core::models::*;

#[test]
fn rank_cmp_orders_score_desc_then_id_asc() {
    let mut hits = vec![
        SearchHit::new("f3", 0.60, "c"),
        SearchHit::new("f2", 0.91, "b"),
        SearchHit::new("f1", 0.91, "a"),
    ];
    hits.sort_by(|a, b| a.rank_cmp(b));
    let ids: Vec<&str> = hits.iter().map(|h| h.fragment_id.as_str()).collect();
    assert_eq!(ids, vec!["f1", "f2", "f3"]);
}

#[test]
fn rank_cmp_equal_for_identical_hits() {
    let a = SearchHit::new("f1", 0.5, "x");
    let b = SearchHit::new("f1", 0.5, "y");
    assert_eq!(a.rank_cmp(&b), Ordering::Equal);
}

#[test]
fn signed_zero_scores_tie_and_break_by_id() {
    let positive = SearchHit::new("f2", 0.0, "");
    let negative = SearchHit::new("f1", -0.0, "");
    assert_eq!(negative.rank_cmp(&positive), Ordering::Less);
    assert_eq!(positive.rank_cmp(&negative), Ordering::Greater);

    let mut hits = vec![positive, negative];
    hits.sort_by(|a, b| a.rank_cmp(b));
    assert_eq!(hits[0].fragment_id, "f1");
    // Stored score is left as-is.
    assert!(hits[0].score.is_sign_negative());
}

#[test]
fn negative_scores_still_order() {
    let high = SearchHit::new("b", -0.1, "");
    let low = SearchHit::new("a", -0.9, "");
    assert_eq!(high.rank_cmp(&low), Ordering::Less);
}

#[test]
fn embedding_vector_rejects_wrong_length() {
    let err = EmbeddingVector::with_dimensions(vec![0.1; 3], 4).unwrap_err();
    assert!(err.to_string().contains("expected 4"));
    assert!(EmbeddingVector::with_dimensions(vec![0.1; 4], 4).is_ok());
}

#[test]
fn embedding_vector_norm_and_zero() {
    let v = EmbeddingVector::new(vec![3.0, 4.0]);
    assert!((v.norm() - 5.0).abs() < 1e-9);
    assert!(!v.is_zero());
    assert!(EmbeddingVector::new(vec![0.0; 8]).is_zero());
}

#[test]
fn search_outcome_reports_truncation() {
    let outcome = SearchOutcome::empty("idx", 80, 50);
    assert!(outcome.truncated());
    assert!(outcome.is_empty());
    assert!(!SearchOutcome::empty("idx", 5, 5).truncated());
}

#[test]
fn relation_from_option() {
    let found: Relation<DocumentRef> = Some(DocumentRef {
        id: "d1".into(),
        title: "Intro".into(),
    })
    .into();
    assert!(found.is_found());
    let missing: Relation<DocumentRef> = None.into();
    assert_eq!(missing, Relation::Missing);
    assert!(missing.into_option().is_none());
}

#[test]
fn unavailable_context_is_incomplete() {
    let ctx = ExpansionContext::unavailable("store hiccup");
    assert!(!ctx.is_complete());
    assert!(ctx.document.is_unavailable());
    assert!(ctx.related_fragments.is_empty());
}

#[test]
fn relation_serializes_with_status_tag() {
    let rel: Relation<AuthorRef> = Relation::Found(AuthorRef {
        id: "a1".into(),
        name: "Ada".into(),
    });
    let json = serde_json::to_value(&rel).unwrap();
    assert_eq!(json["status"], "found");
    assert_eq!(json["value"]["name"], "Ada");
    let missing = serde_json::to_value(Relation::<AuthorRef>::Missing).unwrap();
    assert_eq!(missing["status"], "missing");
}

#[test]
fn pipeline_stage_display_and_terminal() {
    assert_eq!(PipelineStage::Aggregating.to_string(), "aggregating");
    assert!(PipelineStage::Done.is_terminal());
    assert!(PipelineStage::Failed.is_terminal());
    assert!(!PipelineStage::Expanding.is_terminal());
}

#[test]
fn query_builder_sets_options() {
    let q = Query::new("graph databases").with_limit(3).with_expand_graph(false);
    assert_eq!(q.limit, Some(3));
    assert_eq!(q.expand_graph, Some(false));
}

#[test]
fn retrieval_result_limit_clamped() {
    let r = RetrievalResult::empty("q", 100, 50);
    assert!(r.limit_clamped());
    assert_eq!(r.results_count(), 0);
}

#[test]
fn corpus_parses_with_implied_edges() {
    use trellis_core::models::Corpus;

    let corpus = Corpus::from_json(
        r#"{
            "authors": [{"id": "a1", "name": "Ada"}],
            "documents": [{"id": "d1", "title": "Notes", "author_id": "a1"}],
            "fragments": [
                {"id": "f1", "text": "first", "document_id": "d1"},
                {"id": "f2", "text": "orphan"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(corpus.documents[0].author_id.as_deref(), Some("a1"));
    assert_eq!(corpus.fragment("f2").unwrap().document_id, None);
    assert!(corpus.fragment("f9").is_none());
    assert!(!corpus.is_empty());
}
