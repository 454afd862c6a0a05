//! Compaction: pack live slots to the front, order preserved.

use tracing::trace;

use crate::slots::SlotModel;
use crate::store::CellStore;

/// Single forward pass with a write cursor. Returns the live count.
///
/// Afterwards `[0, live)` holds the live slots in their original order and
/// `[live, slot_count)` is free.
pub(crate) fn compact_slots<M: SlotModel>(model: &mut M) -> usize {
    let mut cursor = 0;
    for slot in 0..model.slot_count() {
        if !model.is_live(slot) {
            continue;
        }
        if slot != cursor {
            model.relocate(slot, cursor);
            model.vacate(slot, slot);
        }
        cursor += 1;
    }
    cursor
}

impl CellStore {
    /// Move every live slot to the front, keeping order, and sentinel-fill
    /// the rest. Capacity is unchanged. Returns the live count.
    pub fn compact(&mut self) -> usize {
        let live = compact_slots(self);
        trace!(capacity = self.capacity(), live, "compacted cell store");
        live
    }
}
