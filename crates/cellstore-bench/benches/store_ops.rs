//! Criterion micro-benchmarks for cell store writes, inserts, erases and
//! searches.

use std::hint::black_box;

use cellstore_array::CellStore;
use cellstore_bench::{cell_for, dense_profile, sparse_profile, spread_ranges, BENCH_WIDTH};
use cellstore_core::{CellRange, SearchResultKind, StoreConfig, WriteMode};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use smallvec::SmallVec;

/// Benchmark: overwrite 10K slots into an empty store (one allocation).
fn bench_overwrite_10k(c: &mut Criterion) {
    let data: Vec<u8> = (0..10_000).flat_map(|i| cell_for(i, 1)).collect();
    c.bench_function("overwrite_10k", |b| {
        b.iter(|| {
            let mut store = CellStore::new(BENCH_WIDTH).unwrap();
            store.overwrite(CellRange::new(0, 9_999), &data).unwrap();
            black_box(store.capacity());
        });
    });
}

/// Benchmark: insert one cell at the front of a dense 10K store, which
/// shifts every slot and grows by one.
fn bench_insert_front_dense_10k(c: &mut Criterion) {
    let cell = cell_for(0, 2);
    c.bench_function("insert_front_dense_10k", |b| {
        b.iter_batched(
            || dense_profile(10_000, 3),
            |mut store| {
                store.insert(CellRange::single(0), &cell).unwrap();
                black_box(store.capacity());
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: a 16-range insert batch into a sparse store whose trailing
/// free slots absorb the displacement without reallocating.
fn bench_insert_batch_reuse(c: &mut Criterion) {
    let ranges = spread_ranges(16, 8_000);
    let cells: Vec<[u8; BENCH_WIDTH]> = (0..16).map(|i| cell_for(i, 4)).collect();
    let sources: SmallVec<[&[u8]; 16]> = cells.iter().map(|c| c.as_slice()).collect();
    c.bench_function("insert_batch16_reuse", |b| {
        b.iter_batched(
            || sparse_profile(8_000, 8, 64, 5),
            |mut store| {
                store.write(&ranges, &sources, WriteMode::Insert).unwrap();
                black_box(store.capacity());
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: erase every other 100-slot block of a dense store, with and
/// without shrinking.
fn bench_erase_compact(c: &mut Criterion) {
    let ranges: Vec<CellRange> = (0..50)
        .map(|k| CellRange::new(k * 200, k * 200 + 99))
        .collect();
    for shrink in [false, true] {
        let name = if shrink { "erase_shrink_10k" } else { "erase_retain_10k" };
        c.bench_function(name, |b| {
            b.iter_batched(
                || dense_profile(10_000, 6),
                |mut store| {
                    store.erase(&ranges, shrink).unwrap();
                    black_box(store.capacity());
                },
                BatchSize::LargeInput,
            );
        });
    }
}

/// Benchmark: backward search for a value near the front of 10K slots.
fn bench_search_backward(c: &mut Criterion) {
    let store = dense_profile(10_000, 7);
    let target = cell_for(3, 7);
    c.bench_function("search_backward_10k", |b| {
        b.iter(|| {
            let hit = store
                .search(&[CellRange::new(-1, 0)], &target, SearchResultKind::Index)
                .unwrap();
            black_box(hit);
        });
    });
}

/// Benchmark: repeated push_back with pre-allocation slack.
fn bench_push_back_slack(c: &mut Criterion) {
    let cell = cell_for(1, 8);
    c.bench_function("push_back_1k_slack64", |b| {
        b.iter(|| {
            let mut store =
                CellStore::with_config(BENCH_WIDTH, StoreConfig::new().with_slack(64)).unwrap();
            for _ in 0..1_000 {
                store.push_back(&cell).unwrap();
            }
            black_box(store.capacity());
        });
    });
}

criterion_group!(
    benches,
    bench_overwrite_10k,
    bench_insert_front_dense_10k,
    bench_insert_batch_reuse,
    bench_erase_compact,
    bench_search_backward,
    bench_push_back_slack
);
criterion_main!(benches);
