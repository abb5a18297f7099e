//! Benchmark for reward generation and case opening.
//!
//! Run with: cargo bench --package casebox_economy --bench reward_benchmark

use std::hint::black_box;

use casebox_economy::{
    CaseCategory, EconomyStore, MemoryStorage, RewardEngine, StoreOptions, WeightTable,
};
use casebox_shared::default_cases;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_select(c: &mut Criterion) {
    let table = WeightTable::for_category(CaseCategory::Free);

    c.bench_function("weight_table_select", |b| {
        let mut roll = 0.0f64;
        b.iter(|| {
            roll = (roll + 0.618_033_988_7) % 100.0;
            black_box(table.select(black_box(roll)))
        });
    });
}

fn benchmark_generate_reward(c: &mut Criterion) {
    let engine = RewardEngine::default();
    let cases = default_cases();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut group = c.benchmark_group("generate_reward");
    for case in &cases {
        group.bench_function(case.id.as_str(), |b| {
            b.iter(|| black_box(engine.generate_reward(case, 1_700_000_000_000, &mut rng)));
        });
    }
    group.finish();
}

fn benchmark_statistics(c: &mut Criterion) {
    let engine = RewardEngine::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut group = c.benchmark_group("drop_statistics");
    group.throughput(Throughput::Elements(100_000));
    group.sample_size(10);

    group.bench_function("premium_100k", |b| {
        b.iter(|| {
            black_box(engine.run_statistics(CaseCategory::Premium, black_box(100_000), &mut rng))
        });
    });

    group.finish();
}

fn benchmark_open_case(c: &mut Criterion) {
    let store = EconomyStore::open(MemoryStorage::new(), StoreOptions::seeded(1)).unwrap();

    c.bench_function("store_open_and_sell_free_case", |b| {
        b.iter(|| {
            let knife = store.open_case(black_box("free-case")).unwrap();
            black_box(store.sell_item(&knife.id).unwrap())
        });
    });
}

criterion_group!(
    benches,
    benchmark_select,
    benchmark_generate_reward,
    benchmark_statistics,
    benchmark_open_case
);
criterion_main!(benches);
