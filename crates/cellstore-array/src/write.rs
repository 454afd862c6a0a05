//! Batched writes in overwrite and insert mode, plus the one-cell
//! `push_front` / `push_back` conveniences.

use cellstore_core::{CellRange, RangeBatch, StoreError, WriteMode};

use crate::slots::SlotModel;
use crate::store::CellStore;

impl CellStore {
    /// Write `sources[i]` into `ranges[i]` for every `i`.
    ///
    /// Each source must be exactly `range.len() * cell_width` bytes. A
    /// reversed range (`start > end`) receives its source back to front.
    ///
    /// - [`WriteMode::Overwrite`] replaces whatever is in the destination
    ///   and grows the store, once, if any range reaches past the capacity.
    /// - [`WriteMode::Insert`] displaces live data in each destination
    ///   toward the tail. Ranges apply in ascending order of `start`, so
    ///   every source ends up at the slots its range names. Each range must
    ///   lie inside the store as the lower ranges of the batch left it.
    ///
    /// The whole batch is validated before the store changes.
    pub fn write(
        &mut self,
        ranges: &[CellRange],
        sources: &[&[u8]],
        mode: WriteMode,
    ) -> Result<(), StoreError> {
        let batch = self.prepare_batch(ranges, sources)?;
        if batch.is_empty() {
            return Ok(());
        }
        match mode {
            WriteMode::Overwrite => self.overwrite_batch(&batch, sources),
            WriteMode::Insert => self.insert_batch(&batch, sources),
        }
    }

    /// Write one range using the configured write mode.
    pub fn write_at(
        &mut self,
        range: impl Into<CellRange>,
        source: &[u8],
    ) -> Result<(), StoreError> {
        self.write(&[range.into()], &[source], self.config.write_mode)
    }

    /// Overwrite one range.
    pub fn overwrite(
        &mut self,
        range: impl Into<CellRange>,
        source: &[u8],
    ) -> Result<(), StoreError> {
        self.write(&[range.into()], &[source], WriteMode::Overwrite)
    }

    /// Insert into one range.
    pub fn insert(
        &mut self,
        range: impl Into<CellRange>,
        source: &[u8],
    ) -> Result<(), StoreError> {
        self.write(&[range.into()], &[source], WriteMode::Insert)
    }

    /// Insert one cell at slot 0, shifting live data back by one.
    ///
    /// On an unallocated store this allocates and writes slot 0.
    pub fn push_front(&mut self, cell: &[u8]) -> Result<(), StoreError> {
        let mode = if self.is_allocated() {
            WriteMode::Insert
        } else {
            WriteMode::Overwrite
        };
        self.write(&[CellRange::single(0)], &[cell], mode)
    }

    /// Write one cell just after the last live slot and return its index.
    ///
    /// Trailing free capacity is reused first; a full store grows by one
    /// slot plus the configured slack.
    pub fn push_back(&mut self, cell: &[u8]) -> Result<usize, StoreError> {
        let slot = self.capacity() - self.trailing_free();
        let index = isize::try_from(slot).map_err(|_| StoreError::OutOfMemory {
            requested_slots: slot.saturating_add(1),
            cell_width: self.cell_width(),
        })?;
        self.write(&[CellRange::single(index)], &[cell], WriteMode::Overwrite)?;
        Ok(slot)
    }

    /// Normalize `ranges` and check every source length against its range.
    pub(crate) fn prepare_batch(
        &self,
        ranges: &[CellRange],
        sources: &[&[u8]],
    ) -> Result<RangeBatch, StoreError> {
        if ranges.len() != sources.len() {
            return Err(StoreError::BatchMismatch {
                ranges: ranges.len(),
                sources: sources.len(),
            });
        }
        let batch = RangeBatch::normalize(ranges, self.capacity())?;
        let width = self.cell_width();
        for (range, source) in batch.ranges().iter().zip(sources) {
            let expected = range.len().saturating_mul(width);
            if source.len() != expected {
                return Err(StoreError::LengthMismatch {
                    expected,
                    actual: source.len(),
                });
            }
        }
        Ok(batch)
    }

    fn overwrite_batch(
        &mut self,
        batch: &RangeBatch,
        sources: &[&[u8]],
    ) -> Result<(), StoreError> {
        if let Some(highest_end) = batch.highest_end() {
            self.ensure_capacity_for(highest_end)?;
        }
        for (range, source) in batch.ranges().iter().zip(sources) {
            self.land(range, source);
        }
        Ok(())
    }
}
