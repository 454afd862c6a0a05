//! Buffer growth and shrinking.
//!
//! Every growth path funnels through [`CellStore::grow_to`], which reserves
//! memory for both the byte buffer and (in tracked mode) the occupancy
//! bits before changing either, so a failed allocation leaves the store
//! exactly as it was.

use cellstore_core::StoreError;
use tracing::debug;

use crate::store::CellStore;

impl CellStore {
    /// Make slot `highest_end` addressable for an overwrite write.
    ///
    /// Allocates `highest_end + 1 + slack` slots on an unallocated store,
    /// or extends to that size when `highest_end` is past the capacity.
    /// Existing slots are never truncated.
    pub(crate) fn ensure_capacity_for(&mut self, highest_end: usize) -> Result<(), StoreError> {
        let capacity = self.capacity();
        if highest_end < capacity {
            return Ok(());
        }
        let target = highest_end
            .checked_add(1)
            .and_then(|n| n.checked_add(self.config.pre_allocation_slack))
            .ok_or(StoreError::OutOfMemory {
                requested_slots: usize::MAX,
                cell_width: self.cell_width(),
            })?;
        self.grow_to(target)
    }

    /// Add `shortfall` slots plus the configured slack.
    pub(crate) fn grow_by(&mut self, shortfall: usize) -> Result<(), StoreError> {
        let target = self
            .capacity()
            .checked_add(shortfall)
            .and_then(|n| n.checked_add(self.config.pre_allocation_slack))
            .ok_or(StoreError::OutOfMemory {
                requested_slots: usize::MAX,
                cell_width: self.cell_width(),
            })?;
        self.grow_to(target)
    }

    /// Extend to exactly `target` slots, sentinel-filling the new tail.
    fn grow_to(&mut self, target: usize) -> Result<(), StoreError> {
        let from = self.capacity();
        if target <= from {
            return Ok(());
        }
        self.occupancy
            .try_reserve_for(target)
            .map_err(|_| StoreError::OutOfMemory {
                requested_slots: target,
                cell_width: self.cell_width(),
            })?;
        self.cells.try_grow_to(target, &self.pattern)?;
        self.occupancy.resize(target);
        debug!(
            from,
            to = target,
            cell_width = self.cell_width(),
            "grew cell store"
        );
        Ok(())
    }

    /// Reallocate down to exactly `slots` slots.
    ///
    /// Callers compact first, so only sentinel slots are dropped.
    pub(crate) fn shrink_to(&mut self, slots: usize) {
        let from = self.capacity();
        if slots >= from {
            return;
        }
        self.cells.shrink_to(slots);
        self.occupancy.resize(slots);
        debug!(
            from,
            to = slots,
            cell_width = self.cell_width(),
            "shrank cell store"
        );
    }
}
