//! Erase: sentinel-fill ranges, compact, optionally shrink.

use cellstore_core::{CellRange, RangeBatch, StoreError};
use tracing::trace;

use crate::compact::compact_slots;
use crate::slots::SlotModel;
use crate::store::CellStore;

impl CellStore {
    /// Free every slot in `ranges`, then compact.
    ///
    /// With `shrink`, the buffer is then reallocated down to exactly the
    /// live count; otherwise capacity is unchanged and the freed slots
    /// become sentinel padding at the tail. Every range must lie inside the
    /// current capacity. Ranges may overlap. An empty batch does nothing.
    pub fn erase(&mut self, ranges: &[CellRange], shrink: bool) -> Result<(), StoreError> {
        if ranges.is_empty() {
            return Ok(());
        }
        let batch = RangeBatch::normalize_overlapping(ranges, self.capacity())?;
        batch.check_bounds(self.capacity())?;

        for range in batch.ranges() {
            self.vacate(range.start, range.end);
        }
        let live = compact_slots(self);
        trace!(
            ranges = batch.len(),
            live,
            shrink,
            "erased cell ranges"
        );
        if shrink {
            self.shrink_to(live);
        }
        Ok(())
    }

    /// Erase one range using the configured erase mode.
    pub fn erase_at(&mut self, range: impl Into<CellRange>) -> Result<(), StoreError> {
        let shrink = self.config.erase_mode.shrinks();
        self.erase(&[range.into()], shrink)
    }
}
