//! Test fixtures for cellstore development.
//!
//! Most tests store `i32` values in 4-byte little-endian cells. With the
//! default `0xFF` fill byte the sentinel cell decodes to `-1`, so `-1` is
//! the one value these helpers treat as "unused".

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;

use cellstore_array::CellStore;
use cellstore_core::StoreConfig;

pub use model::SequenceModel;

/// Width of an `i32` cell.
pub const I32_WIDTH: usize = 4;

/// The value whose encoding equals the default sentinel pattern.
pub const SENTINEL_I32: i32 = -1;

pub fn cell(value: i32) -> [u8; I32_WIDTH] {
    value.to_le_bytes()
}

/// Encode `values` as consecutive cells.
pub fn cells(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Decode a buffer of whole `i32` cells.
///
/// # Panics
///
/// Panics if `bytes` is not a multiple of four bytes long.
pub fn decode(bytes: &[u8]) -> Vec<i32> {
    assert_eq!(bytes.len() % I32_WIDTH, 0, "partial i32 cell");
    bytes
        .chunks_exact(I32_WIDTH)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Build a store from per-slot values; `None` slots hold the sentinel.
pub fn store_of_i32(slots: &[Option<i32>]) -> CellStore {
    store_of_i32_with(slots, StoreConfig::default())
}

pub fn store_of_i32_with(slots: &[Option<i32>], config: StoreConfig) -> CellStore {
    let values: Vec<i32> = slots.iter().map(|s| s.unwrap_or(SENTINEL_I32)).collect();
    CellStore::from_bytes(I32_WIDTH, cells(&values), config).unwrap()
}

/// Every slot of `store`, with free slots as `None`.
pub fn slots_i32(store: &CellStore) -> Vec<Option<i32>> {
    let view = store.view();
    decode(view.as_bytes())
        .into_iter()
        .enumerate()
        .map(|(i, v)| view.is_live(i).then_some(v))
        .collect()
}

/// Live values of `store` in slot order.
pub fn live_i32s(store: &CellStore) -> Vec<i32> {
    store
        .view()
        .live()
        .flat_map(|(_, bytes)| decode(bytes))
        .collect()
}

/// Number of live slots strictly before `slot`.
pub fn live_before(store: &CellStore, slot: usize) -> usize {
    (0..slot.min(store.capacity()))
        .filter(|&i| store.is_live(i))
        .count()
}
