//! Benchmarks for the epimap aggregation core
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use epimap::aggregate::{aggregate, summarize, totals};
use epimap::snapshot::CaseRow;

/// Synthetic row table spread over ~190 country keys, several rows each
fn create_test_rows(count: usize) -> Vec<CaseRow> {
    (0..count)
        .map(|i| {
            let country_idx = i % 190;
            CaseRow::new(
                format!("Country {}", country_idx),
                (i as u64 * 37) % 100_000,
                (i as u64 * 7) % 1_000,
                (country_idx as f64) / 2.0 - 45.0,
                (i % 360) as f64 - 180.0,
            )
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [1_000, 10_000, 100_000] {
        let rows = create_test_rows(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("aggregate_{}", size), |b| {
            b.iter(|| aggregate(black_box(&rows)))
        });

        group.bench_function(format!("totals_{}", size), |b| {
            b.iter(|| totals(black_box(&rows)))
        });

        group.bench_function(format!("summarize_{}", size), |b| {
            b.iter(|| summarize(black_box(&rows)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
