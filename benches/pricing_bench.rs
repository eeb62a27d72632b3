use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use openlattice::core::{OptionType, PricingEngine};
use openlattice::engines::monte_carlo::AsianMcEngine;
use openlattice::engines::tree::BinomialTreeEngine;
use openlattice::instruments::{AsianOption, VanillaOption};
use openlattice::market::Market;
use std::hint::black_box;

fn benchmark_market() -> Market {
    Market::builder()
        .spot(100.0)
        .rate(0.02)
        .build()
        .expect("benchmark market should be valid")
}

fn bench_tree_backward_induction(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::american_put(100.0, 1.0);
    let mut group = c.benchmark_group("tree_backward_induction");

    for steps in [50_usize, 200, 500].iter() {
        let engine = BinomialTreeEngine::new(1.02, 1.0 / 1.02, *steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |b, _| {
            b.iter(|| {
                let px = engine
                    .price(black_box(&option), black_box(&market))
                    .expect("pricing should succeed")
                    .price;
                black_box(px)
            })
        });
    }

    group.finish();
}

fn bench_mc_asian_paths(c: &mut Criterion) {
    let market = benchmark_market();
    let option = AsianOption::new(OptionType::Call, 95.0, 1.0);
    let mut group = c.benchmark_group("mc_asian_paths");

    for paths in [10_000_usize, 100_000].iter() {
        let engine = AsianMcEngine::new(1.05, 1.0 / 1.05, 64, *paths, 42);
        group.bench_with_input(BenchmarkId::from_parameter(paths), paths, |b, _| {
            b.iter(|| {
                let px = engine
                    .price(black_box(&option), black_box(&market))
                    .expect("pricing should succeed")
                    .price;
                black_box(px)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_backward_induction, bench_mc_asian_paths);
criterion_main!(benches);
