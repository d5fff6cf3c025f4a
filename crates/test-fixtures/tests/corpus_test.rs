use test_fixtures::{embedding_config, library, seeded_store};
use trellis_embeddings::EmbeddingEngine;
use trellis_storage::queries::corpus_ops::CountedTable;

#[test]
fn library_corpus_loads() {
    let corpus = library();
    assert_eq!(corpus.authors.len(), 2);
    assert_eq!(corpus.documents.len(), 4);
    assert_eq!(corpus.fragments.len(), 10);
    assert!(corpus.fragment("frag-010").unwrap().document_id.is_none());
}

#[test]
fn library_seeds_sqlite() {
    let engine = EmbeddingEngine::new(embedding_config());
    let store = seeded_store(&library(), &engine);
    assert_eq!(store.count(CountedTable::Fragments).unwrap(), 10);
}
