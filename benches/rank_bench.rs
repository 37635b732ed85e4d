//! Ranking benchmarks
//!
//! The ranker runs on every keystroke over the full candidate set, so it
//! must stay comfortably inside a single event-handler invocation for a few
//! thousand short strings.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use promptloom::rank;

fn candidate_set(size: usize) -> Vec<String> {
    let themes = ["red", "blue", "anime", "landscape", "portrait", "detail"];
    (0..size)
        .map(|i| format!("wildcards/{}/entry_{i:04}", themes[i % themes.len()]))
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let candidates = candidate_set(4000);

    c.bench_function("rank_prefix_query_4k", |b| {
        b.iter(|| rank(black_box("wildcards/red"), black_box(&candidates)))
    });

    c.bench_function("rank_substring_query_4k", |b| {
        b.iter(|| rank(black_box("entry_02"), black_box(&candidates)))
    });

    c.bench_function("rank_subsequence_query_4k", |b| {
        b.iter(|| rank(black_box("wde3"), black_box(&candidates)))
    });

    c.bench_function("rank_empty_query_4k", |b| {
        b.iter(|| rank(black_box(""), black_box(&candidates)))
    });
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
