//! Benchmarks for draining traced sorts.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use sort_trace::{
    animation::{Driver, NullView},
    compute::{AlgorithmRegistry, drain_counts},
    schema::{ArrayPattern, PlaybackConfig},
};

fn bench_drain(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();

    for name in registry.names() {
        let mut group = c.benchmark_group(format!("drain_{}", name));

        for size in [64, 256, 1024] {
            let input = ArrayPattern::Random { seed: Some(42) }.generate(size);

            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
                b.iter(|| {
                    let mut data = input.clone();
                    let mut sequence = registry.start(name, &mut data).unwrap();
                    black_box(drain_counts(sequence.as_mut()));
                });
            });
        }

        group.finish();
    }
}

fn bench_unpaced_driver(c: &mut Criterion) {
    let registry = AlgorithmRegistry::builtin();
    let config = PlaybackConfig::unpaced();
    let input = ArrayPattern::Reversed.generate(256);

    c.bench_function("driver_quick_256", |b| {
        b.iter(|| {
            let mut data = input.clone();
            let mut sequence = registry.start("quick", &mut data).unwrap();
            black_box(Driver::new(&config).run(sequence.as_mut(), &mut NullView));
        });
    });
}

criterion_group!(benches, bench_drain, bench_unpaced_driver);
criterion_main!(benches);
