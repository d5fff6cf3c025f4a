use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trellis_core::models::{ExpansionContext, SearchHit};
use trellis_retrieval::aggregate;

/// 1K hits with ~10% duplicate ids and frequent ties.
fn build_hits() -> Vec<SearchHit> {
    (0..1000)
        .map(|i| {
            let id = format!("f{:04}", i % 900);
            SearchHit::new(id, f64::from((i * 37) % 100) / 100.0, "fragment text")
        })
        .collect()
}

fn bench_aggregate_plain(c: &mut Criterion) {
    let hits = build_hits();
    c.bench_function("aggregate_1k_hits_limit_50", |b| {
        b.iter(|| aggregate("q", black_box(&hits), None, 50, 50));
    });
}

fn bench_aggregate_expanded(c: &mut Criterion) {
    let hits = build_hits();
    let contexts: BTreeMap<String, ExpansionContext> = hits
        .iter()
        .map(|h| (h.fragment_id.clone(), ExpansionContext::unavailable("bench")))
        .collect();
    c.bench_function("aggregate_1k_hits_expanded", |b| {
        b.iter(|| aggregate("q", black_box(&hits), Some(&contexts), 50, 50));
    });
}

criterion_group!(benches, bench_aggregate_plain, bench_aggregate_expanded);
criterion_main!(benches);
