//! Benchmark profiles for cellstore.
//!
//! - [`dense_profile`]: every slot live, no trailing free space
//! - [`sparse_profile`]: every `stride`-th slot free, plus a free tail
//! - [`spread_ranges`]: evenly spaced, non-overlapping single-slot ranges

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cellstore_array::CellStore;
use cellstore_core::{CellRange, StoreConfig};

/// Width of the benchmark cells (one `u64`).
pub const BENCH_WIDTH: usize = 8;

/// Deterministic non-sentinel cell contents for slot `i`.
pub fn cell_for(i: usize, seed: u64) -> [u8; BENCH_WIDTH] {
    let v = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(i as u64 * 1442695040888963407);
    // Clear the top bit so no cell equals the all-0xFF sentinel.
    (v & (u64::MAX >> 1)).to_le_bytes()
}

/// `slots` live cells with no free space.
pub fn dense_profile(slots: usize, seed: u64) -> CellStore {
    let bytes: Vec<u8> = (0..slots).flat_map(|i| cell_for(i, seed)).collect();
    CellStore::from_bytes(BENCH_WIDTH, bytes, StoreConfig::default()).unwrap()
}

/// `slots` cells where every `stride`-th one is free, followed by `tail`
/// free slots.
pub fn sparse_profile(slots: usize, stride: usize, tail: usize, seed: u64) -> CellStore {
    let bytes: Vec<u8> = (0..slots + tail)
        .flat_map(|i| {
            if i >= slots || i % stride == 0 {
                [0xFF; BENCH_WIDTH]
            } else {
                cell_for(i, seed)
            }
        })
        .collect();
    CellStore::from_bytes(BENCH_WIDTH, bytes, StoreConfig::default()).unwrap()
}

/// `count` single-slot ranges spread evenly over `capacity` slots.
pub fn spread_ranges(count: usize, capacity: usize) -> Vec<CellRange> {
    let step = (capacity / count.max(1)).max(1);
    (0..count)
        .map(|k| CellRange::single((k * step) as isize))
        .collect()
}
