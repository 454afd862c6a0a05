//! Read-only view of a cell store.
//!
//! [`CellView`] borrows the store it was taken from, so it cannot be held
//! across a write, erase or compaction that might move or reallocate the
//! buffer.

use std::slice::ChunksExact;

use crate::slots::SlotModel;
use crate::store::CellStore;

/// A borrowed, read-only view over a store's slots.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    store: &'a CellStore,
}

impl<'a> CellView<'a> {
    pub(crate) fn new(store: &'a CellStore) -> Self {
        Self { store }
    }

    /// Number of slots in view.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Width of one cell in bytes.
    pub fn cell_width(&self) -> usize {
        self.store.cell_width()
    }

    /// Bytes of `slot`, or `None` past the capacity.
    pub fn get(&self, slot: usize) -> Option<&'a [u8]> {
        self.store.slot(slot)
    }

    /// Whether `slot` exists and holds user data.
    pub fn is_live(&self, slot: usize) -> bool {
        self.store.is_live(slot)
    }

    /// Every slot in index order, free ones included.
    pub fn iter(&self) -> ChunksExact<'a, u8> {
        self.store.as_bytes().chunks_exact(self.cell_width())
    }

    /// Live slots with their indices, in index order.
    pub fn live(&self) -> impl Iterator<Item = (usize, &'a [u8])> + 'a {
        let store = self.store;
        self.iter()
            .enumerate()
            .filter(move |&(slot, _)| SlotModel::is_live(store, slot))
    }

    /// Number of live slots.
    pub fn live_len(&self) -> usize {
        self.store.live_len()
    }

    /// The raw buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.store.as_bytes()
    }
}

impl<'a> IntoIterator for CellView<'a> {
    type Item = &'a [u8];
    type IntoIter = ChunksExact<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
