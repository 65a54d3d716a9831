//! Criterion benchmarks for u-facility.
//!
//! Uses generated networks of the sizes the engine is tuned for
//! (15 to 40 consumers).

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use u_facility::coordinate::{CoordinateConfig, CoordinateOptimizer};
use u_facility::cost::CostModel;
use u_facility::generator::NetworkGenerator;
use u_facility::genetic::{GeneticConfig, GeneticOptimizer};
use u_facility::optimizer::Optimizer;

const SIZES: [usize; 3] = [15, 30, 40];

fn bench_cost_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_evaluation");
    let model = CostModel::default();

    for n in SIZES {
        let network = NetworkGenerator::new(42).generate(n).expect("valid generator");
        group.bench_with_input(BenchmarkId::from_parameter(n), &network, |b, net| {
            b.iter(|| black_box(model.evaluate(black_box(net))))
        });
    }
    group.finish();
}

fn bench_coordinate(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_search");
    group.sample_size(10);

    for n in SIZES {
        let network = NetworkGenerator::new(42).generate(n).expect("valid generator");
        group.bench_with_input(BenchmarkId::from_parameter(n), &network, |b, net| {
            b.iter_batched(
                || net.clone(),
                |mut copy| {
                    let mut optimizer = CoordinateOptimizer::new(
                        &mut copy,
                        CoordinateConfig::default(),
                        CostModel::default(),
                    );
                    black_box(optimizer.optimize())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_genetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("genetic_search");
    group.sample_size(10);

    for n in SIZES {
        let network = NetworkGenerator::new(42).generate(n).expect("valid generator");
        let config = GeneticConfig::default().with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(
                format!("p{}_g{}", config.population_size, config.generations),
                n,
            ),
            &(network, config),
            |b, (net, cfg)| {
                b.iter_batched(
                    || net.clone(),
                    |mut copy| {
                        let mut optimizer =
                            GeneticOptimizer::new(&mut copy, cfg.clone(), CostModel::default());
                        black_box(optimizer.optimize())
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cost_evaluation, bench_coordinate, bench_genetic);
criterion_main!(benches);
