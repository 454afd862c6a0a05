//! Retrieve: copy ranges out into a new, independently owned store.

use cellstore_core::{CellRange, NormalizedRange, StoreError};
use smallvec::SmallVec;

use crate::raw::RawCells;
use crate::store::CellStore;

impl CellStore {
    /// Copy the slots of `ranges`, concatenated in caller order, into a new
    /// store with the same width, pattern and configuration.
    ///
    /// Reversed pairs are read in ascending order. Ranges may overlap. The
    /// source store is not modified. An empty batch returns an unallocated
    /// store.
    pub fn retrieve(&self, ranges: &[CellRange]) -> Result<CellStore, StoreError> {
        let capacity = self.capacity();
        let spans = ranges
            .iter()
            .map(|r| {
                let n = r.normalize(capacity)?;
                n.check_bounds(capacity)?;
                Ok(n)
            })
            .collect::<Result<SmallVec<[NormalizedRange; 4]>, StoreError>>()?;

        let width = self.cell_width();
        let total: usize = spans.iter().map(NormalizedRange::len).sum();
        let oom = || StoreError::OutOfMemory {
            requested_slots: total,
            cell_width: width,
        };
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(total.checked_mul(width).ok_or_else(oom)?)
            .map_err(|_| oom())?;
        for span in &spans {
            bytes.extend_from_slice(self.cells.slots(span.start, span.len()));
        }

        Ok(CellStore {
            cells: RawCells::from_vec(width, bytes),
            pattern: self.pattern.clone(),
            occupancy: self.occupancy.gather(&spans),
            config: self.config.clone(),
        })
    }
}
