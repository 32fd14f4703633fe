//! Criterion benchmarks for greedy decoding and the evolutionary loop,
//! measured on generated instances.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use membank_brkga::brkga::{BrkgaConfig, BrkgaEngine, Decoder};
use membank_brkga::problem::{random_problem, GreedyDecoder, InstanceRanges};

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &items in &[16usize, 64, 128] {
        let ranges = InstanceRanges {
            items,
            banks: items / 4,
            conflicts: items,
            ..InstanceRanges::default()
        };
        let problem = random_problem(&ranges, 42);
        let decoder = GreedyDecoder::new(&problem);
        let keys: Vec<f64> = (0..items).map(|i| (i as f64 * 0.61) % 1.0).collect();

        group.bench_with_input(BenchmarkId::from_parameter(items), &keys, |b, keys| {
            b.iter(|| decoder.decode(black_box(keys)))
        });
    }
    group.finish();
}

fn bench_evolve(c: &mut Criterion) {
    let problem = random_problem(&InstanceRanges::default(), 42);

    c.bench_function("evolve_20_generations", |b| {
        b.iter(|| {
            let decoder = GreedyDecoder::new(&problem);
            let config = BrkgaConfig::new(problem.items()).with_seed(42);
            let mut engine = BrkgaEngine::new(decoder, config);
            for _ in 0..20 {
                engine.evolve();
            }
            black_box(engine.best_solution().fitness)
        })
    });
}

criterion_group!(benches, bench_decode, bench_evolve);
criterion_main!(benches);
