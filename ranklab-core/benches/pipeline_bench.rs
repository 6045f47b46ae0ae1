//! Criterion benchmarks for the ranking pipeline hot paths.
//!
//! Benchmarks:
//! 1. Full pipeline over growing universes
//! 2. Per-column metric computation
//! 3. Universe normalization + scoring

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ranklab_core::{
    metrics::MetricsRecord, run_pipeline, score_universe, PriceTable, ScoringConfig,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_column(days: usize, phase: f64) -> Vec<Option<f64>> {
    (0..days)
        .map(|i| {
            // Sparse gaps every 23rd cell keep the missing-value paths warm.
            if i % 23 == 7 {
                None
            } else {
                Some(100.0 + ((i as f64 + phase) * 0.1).sin() * 10.0)
            }
        })
        .collect()
}

fn make_table(instruments: usize, days: usize) -> PriceTable {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let dates = (0..days)
        .map(|i| start + chrono::Duration::days(i as i64))
        .collect();
    let columns = (0..instruments)
        .map(|i| (format!("I{i}"), make_column(days, i as f64)))
        .collect();
    PriceTable::new(dates, columns).unwrap()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_full_pipeline(c: &mut Criterion) {
    let cfg = ScoringConfig::default();
    let mut group = c.benchmark_group("full_pipeline");
    for instruments in [10, 50, 200] {
        let table = make_table(instruments, 252);
        group.bench_with_input(
            BenchmarkId::from_parameter(instruments),
            &table,
            |b, table| b.iter(|| run_pipeline(black_box(table), black_box(&cfg)).unwrap()),
        );
    }
    group.finish();
}

fn bench_metrics_column(c: &mut Criterion) {
    let column = make_column(252 * 5, 0.0);
    c.bench_function("metrics_column_5y", |b| {
        b.iter(|| MetricsRecord::compute(black_box(&column)))
    });
}

fn bench_scoring(c: &mut Criterion) {
    let cfg = ScoringConfig::default();
    let table = make_table(200, 252);
    let metrics: Vec<MetricsRecord> = table
        .columns()
        .iter()
        .map(|col| MetricsRecord::compute(col))
        .collect();
    c.bench_function("score_universe_200", |b| {
        b.iter(|| score_universe(black_box(&metrics), black_box(&cfg)))
    });
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_metrics_column,
    bench_scoring
);
criterion_main!(benches);
