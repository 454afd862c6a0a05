//! Contiguous fixed-width slot storage.
//!
//! [`RawCells`] owns `capacity * width` bytes and knows nothing about
//! liveness. Growth goes through `Vec::try_reserve_exact`, so allocation
//! failure is reported instead of aborting, and the buffer is left
//! untouched when it happens.

use std::ops::Range;

use cellstore_core::{SentinelPattern, StoreError};

/// A fixed-width slot buffer.
///
/// Slot `i` occupies bytes `i * width .. (i + 1) * width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawCells {
    bytes: Vec<u8>,
    width: usize,
}

impl RawCells {
    /// An unallocated buffer for `width`-byte slots.
    pub(crate) fn new(width: usize) -> Self {
        Self {
            bytes: Vec::new(),
            width,
        }
    }

    /// Adopt existing bytes. `bytes.len()` must be a multiple of `width`.
    pub(crate) fn from_vec(width: usize, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len() % width, 0);
        Self { bytes, width }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    /// Number of slots backing the buffer.
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.len() / self.width
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn span(&self, start: usize, count: usize) -> Range<usize> {
        start * self.width..(start + count) * self.width
    }

    /// Bytes of one slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= capacity`.
    pub(crate) fn slot(&self, slot: usize) -> &[u8] {
        &self.bytes[self.span(slot, 1)]
    }

    /// Bytes of `count` consecutive slots starting at `start`.
    pub(crate) fn slots(&self, start: usize, count: usize) -> &[u8] {
        &self.bytes[self.span(start, count)]
    }

    /// Mutable bytes of `count` consecutive slots starting at `start`.
    pub(crate) fn slots_mut(&mut self, start: usize, count: usize) -> &mut [u8] {
        let span = self.span(start, count);
        &mut self.bytes[span]
    }

    /// Copy slot `from` over slot `to`. The source keeps its bytes.
    pub(crate) fn copy_slot(&mut self, from: usize, to: usize) {
        let src = self.span(from, 1);
        self.bytes.copy_within(src, to * self.width);
    }

    /// Extend to `slots` slots, sentinel-filling only the new tail.
    ///
    /// No-op when the buffer already holds at least `slots` slots.
    pub(crate) fn try_grow_to(
        &mut self,
        slots: usize,
        pattern: &SentinelPattern,
    ) -> Result<(), StoreError> {
        let width = self.width;
        let old_len = self.bytes.len();
        let oom = || StoreError::OutOfMemory {
            requested_slots: slots,
            cell_width: width,
        };
        let new_len = slots.checked_mul(width).ok_or_else(oom)?;
        if new_len <= old_len {
            return Ok(());
        }
        self.bytes
            .try_reserve_exact(new_len - old_len)
            .map_err(|_| oom())?;
        self.bytes.resize(new_len, 0);
        pattern.fill(&mut self.bytes[old_len..]);
        Ok(())
    }

    /// Drop every slot from `slots` onward and release the excess memory.
    pub(crate) fn shrink_to(&mut self, slots: usize) {
        self.bytes.truncate(slots * self.width);
        self.bytes.shrink_to_fit();
    }

    /// Release the buffer entirely.
    pub(crate) fn release(&mut self) {
        self.bytes = Vec::new();
    }
}
