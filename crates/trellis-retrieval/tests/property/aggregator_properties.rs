//! Property tests: ordering, dedup, cap, and expand-flag invariance.

use std::collections::{BTreeMap, HashMap, HashSet};

use proptest::prelude::*;

use trellis_core::models::{ExpansionContext, SearchHit};
use trellis_retrieval::aggregate;

fn hit_strategy() -> impl Strategy<Value = SearchHit> {
    // Few ids and coarse scores so duplicates and ties are common. Signed
    // zeros and small negatives come up too.
    (0u8..12, -2i8..8, any::<bool>()).prop_map(|(id, score, negate_zero)| {
        let score = match (score, negate_zero) {
            (0, true) => -0.0,
            (s, _) => f64::from(s) / 8.0,
        };
        SearchHit::new(format!("f{id:02}"), score, format!("text {id}"))
    })
}

proptest! {
    #[test]
    fn prop_results_are_bounded_ordered_and_unique(
        hits in prop::collection::vec(hit_strategy(), 0..40),
        limit in 1usize..15,
    ) {
        let result = aggregate("q", &hits, None, limit, limit).unwrap();

        prop_assert_eq!(result.results_count(), result.results.len());
        prop_assert!(result.results.len() <= limit);

        let distinct: HashSet<&str> = hits.iter().map(|h| h.fragment_id.as_str()).collect();
        prop_assert_eq!(result.results.len(), distinct.len().min(limit));

        let mut seen = HashSet::new();
        for entry in &result.results {
            prop_assert!(seen.insert(entry.fragment_id.clone()));
        }

        for pair in result.results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.score > b.score || (a.score == b.score && a.fragment_id < b.fragment_id));
        }
    }

    #[test]
    fn prop_duplicates_keep_their_best_score(
        hits in prop::collection::vec(hit_strategy(), 1..40),
    ) {
        let mut best: HashMap<&str, f64> = HashMap::new();
        for h in &hits {
            let entry = best.entry(h.fragment_id.as_str()).or_insert(h.score);
            if h.score > *entry {
                *entry = h.score;
            }
        }
        let result = aggregate("q", &hits, None, 100, 100).unwrap();
        for entry in &result.results {
            prop_assert_eq!(entry.score, best[entry.fragment_id.as_str()]);
        }
    }

    #[test]
    fn prop_expansion_never_changes_ids_or_scores(
        hits in prop::collection::vec(hit_strategy(), 0..30),
        limit in 1usize..10,
    ) {
        let contexts: BTreeMap<String, ExpansionContext> = hits
            .iter()
            .map(|h| (h.fragment_id.clone(), ExpansionContext::unavailable("test")))
            .collect();
        let plain = aggregate("q", &hits, None, limit, limit).unwrap();
        let expanded = aggregate("q", &hits, Some(&contexts), limit, limit).unwrap();

        prop_assert_eq!(plain.fragment_ids(), expanded.fragment_ids());
        let plain_scores: Vec<f64> = plain.results.iter().map(|r| r.score).collect();
        let expanded_scores: Vec<f64> = expanded.results.iter().map(|r| r.score).collect();
        prop_assert_eq!(plain_scores, expanded_scores);
    }

    #[test]
    fn prop_aggregation_is_idempotent(
        hits in prop::collection::vec(hit_strategy(), 0..30),
        limit in 1usize..10,
    ) {
        let first = aggregate("q", &hits, None, limit, limit).unwrap();
        let second = aggregate("q", &hits, None, limit, limit).unwrap();
        prop_assert_eq!(first, second);
    }
}
