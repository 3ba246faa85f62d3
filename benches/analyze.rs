use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stampwatch::{
    analyze, extract_pairs, try_analyze, MemorySession, TimestampPair, DEFAULT_GENERATION_FIELD,
};

/// Pairs at 100 Hz with a little deterministic jitter on both clocks.
fn jittered_pairs(count: usize) -> Vec<TimestampPair> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.01;
            let jitter = ((i * 7919) % 13) as f64 * 1e-5;
            TimestampPair::new(t + 0.002 + jitter, t + jitter / 2.0)
        })
        .collect()
}

/// Benchmark the statistics engine over channels of varying length
fn bench_analyze_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    let configs = vec![
        ("1s_at_100hz", 100),
        ("1min_at_100hz", 6_000),
        ("10min_at_100hz", 60_000),
    ];

    for (name, count) in configs {
        let pairs = jittered_pairs(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(name), &pairs, |b, pairs| {
            b.iter(|| {
                black_box(analyze(pairs.iter().copied()));
            });
        });
    }
    group.finish();
}

/// Benchmark extraction plus analysis from an in-memory session
fn bench_extract_and_analyze(c: &mut Criterion) {
    let raw: Vec<(f64, f64)> = jittered_pairs(6_000)
        .into_iter()
        .map(|p| (p.capture, p.generation))
        .collect();
    let session = MemorySession::from_pairs("/novatel/oem7/corrimu", &raw);

    let mut group = c.benchmark_group("extract_and_analyze");
    group.throughput(Throughput::Elements(raw.len() as u64));
    group.bench_function("memory_session", |b| {
        b.iter(|| {
            let pairs =
                extract_pairs(&session, "/novatel/oem7/corrimu", DEFAULT_GENERATION_FIELD).unwrap();
            black_box(try_analyze(pairs).unwrap());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_analyze_varying_sizes, bench_extract_and_analyze);
criterion_main!(benches);
