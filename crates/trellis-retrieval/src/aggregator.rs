//! Result aggregation: rank, dedup, cap, attach context.

use std::collections::{BTreeMap, HashSet};

use trellis_core::errors::AggregationError;
use trellis_core::models::{
    ExpansionContext, FragmentContext, Relation, RetrievalResult, RetrievedFragment, SearchHit,
};

/// Assemble the final result.
///
/// Hits are stably sorted by score descending then id ascending, so input
/// that is already ordered keeps its order. The first occurrence of an id
/// wins. The cap applies after dedup and is never refilled. `contexts` is
/// `None` when expansion did not run; entries then carry `Skipped`
/// relations and no context. Expansion never changes order or scores.
pub fn aggregate(
    query: &str,
    hits: &[SearchHit],
    contexts: Option<&BTreeMap<String, ExpansionContext>>,
    requested_limit: usize,
    effective_limit: usize,
) -> Result<RetrievalResult, AggregationError> {
    if let Some(bad) = hits.iter().find(|h| !h.score.is_finite()) {
        return Err(AggregationError::NonFiniteScore {
            fragment_id: bad.fragment_id.clone(),
        });
    }

    let mut ranked: Vec<&SearchHit> = hits.iter().collect();
    ranked.sort_by(|a, b| a.rank_cmp(b));

    let mut seen = HashSet::with_capacity(ranked.len());
    let results = ranked
        .into_iter()
        .filter(|hit| seen.insert(hit.fragment_id.as_str()))
        .take(effective_limit)
        .map(|hit| attach(hit, contexts))
        .collect();

    Ok(RetrievalResult {
        query: query.to_string(),
        results,
        requested_limit,
        effective_limit,
        expanded: contexts.is_some(),
    })
}

fn attach(hit: &SearchHit, contexts: Option<&BTreeMap<String, ExpansionContext>>) -> RetrievedFragment {
    let (document, author, context) = match contexts {
        None => (Relation::Skipped, Relation::Skipped, None),
        Some(map) => match map.get(&hit.fragment_id) {
            Some(ctx) => (
                ctx.document.clone(),
                ctx.author.clone(),
                Some(FragmentContext {
                    related_fragments: ctx.related_fragments.clone(),
                    other_documents: ctx.other_documents.clone(),
                }),
            ),
            None => (
                Relation::unavailable("no expansion context"),
                Relation::unavailable("no expansion context"),
                None,
            ),
        },
    };
    RetrievedFragment {
        fragment_id: hit.fragment_id.clone(),
        text: hit.text.clone(),
        score: hit.score,
        document,
        author,
        context,
    }
}
