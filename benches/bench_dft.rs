use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pardft::config::default_core_count;
use pardft::{CorePool, DftEngine, DiscreteSystem, RangeExecutor, RealSequence};

fn random_sequence(len: usize, seed: u64) -> RealSequence {
    let mut rng = StdRng::seed_from_u64(seed);
    RealSequence::from_values((0..len).map(|_| rng.gen_range(-32768..32768)).collect())
}

fn pools() -> Vec<(&'static str, CorePool)> {
    let cores = default_core_count(num_cpus::get());
    vec![
        ("single", CorePool::new(1).unwrap()),
        ("parallel", CorePool::new(cores).unwrap()),
    ]
}

fn bench_forward(c: &mut Criterion) {
    let pools = pools();
    for size in [256usize, 1024, 4096] {
        let mut group = c.benchmark_group(format!("dft_forward_{}", size));
        let input = random_sequence(size, size as u64);
        for (mode, pool) in &pools {
            let engine = DftEngine::new(pool);
            group.bench_function(BenchmarkId::new(*mode, size), |b| {
                b.iter(|| engine.forward(black_box(&input)).unwrap())
            });
        }
        group.finish();
    }
}

fn bench_range(c: &mut Criterion) {
    let pools = pools();
    for size in [44_100usize, 441_000] {
        let mut group = c.benchmark_group(format!("range_adder_{}", size));
        let mut output = random_sequence(size, 1);
        let b = random_sequence(size, 2);
        for (mode, pool) in &pools {
            let executor = RangeExecutor::with_minimum_division_size(pool, 8820);
            group.bench_function(BenchmarkId::new(*mode, size), |bench| {
                bench.iter(|| {
                    executor
                        .execute(&DiscreteSystem::Adder, output.view_mut(), &[b.view()])
                        .unwrap()
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_forward, bench_range);
criterion_main!(benches);
