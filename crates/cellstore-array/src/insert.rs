//! The insertion engine.
//!
//! Inserting into `[start, end]` displaces instead of overwriting. For one
//! range, with `tail` the last live slot and `required` the number of live
//! slots inside the range:
//!
//! ```text
//! before:  | prefix | [start ........ end] | ..... tail | free ... |
//!                      live + free mixed     any slots
//!
//! after:   | prefix | [new data .... ] | displaced block | free |
//!                     start        end   end+1    new_tail
//! ```
//!
//! The displaced block is every slot of `[start, tail]` except the free
//! slots inside the range, in original order, so it ends exactly at
//! `new_tail = max(tail, end) + required`. Slots are moved one at a time
//! walking down from `tail`, each to the current high-water position,
//! which never overtakes a slot that has not been read yet.
//!
//! A batch is applied in ascending `start` order, whatever order the caller
//! listed it in. Each range names the slots its source occupies once the
//! whole batch has landed: displacement only moves slots at or after the
//! range being inserted, so a later range never shifts data an earlier
//! one already wrote. Each range must lie inside the store as the lower
//! ranges left it.
//!
//! The whole batch is first dry-run over a [`LivenessMask`] to validate
//! those bounds and learn the final capacity, so the buffer grows at most
//! once and only by the shortfall that trailing free slots cannot cover.

use cellstore_core::{CellRange, NormalizedRange, RangeBatch, StoreError};
use tracing::trace;

use crate::slots::{LivenessMask, SlotModel};
use crate::store::CellStore;

/// Sizing computed by dry-running an insertion batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertPlan {
    /// Live slots displaced across the batch.
    pub required: usize,
    /// Free slots after the live tail before the call.
    pub reusable: usize,
    /// Capacity the batch needs, before slack.
    pub needed_capacity: usize,
    /// Slots the buffer grows by, slack included. Zero when trailing free
    /// slots already cover the batch.
    pub growth: usize,
}

/// Outcome of displacing one range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Displacement {
    /// Live slots that were inside the range.
    pub(crate) required: usize,
    /// Slots moved toward the tail.
    pub(crate) moved: usize,
}

/// Vacate `range` by pushing its live slots, and everything after them up
/// to the live tail, toward the tail.
pub(crate) fn displace<M: SlotModel>(model: &mut M, range: &NormalizedRange) -> Displacement {
    let tail = match model.live_tail() {
        Some(tail) if tail >= range.start => tail,
        _ => {
            model.vacate(range.start, range.end);
            return Displacement {
                required: 0,
                moved: 0,
            };
        }
    };

    let required = model.live_in(range.start, range.end);
    let new_tail = tail.max(range.end) + required;
    model.cover(new_tail + 1);

    let mut high = new_tail;
    let mut moved = 0;
    for low in (range.start..=tail).rev() {
        if range.contains(low) && !model.is_live(low) {
            continue;
        }
        if high != low {
            model.relocate(low, high);
        }
        high -= 1;
        moved += 1;
    }
    debug_assert_eq!(high, range.end);

    model.vacate(range.start, range.end);
    Displacement { required, moved }
}

impl CellStore {
    /// Dry-run an insertion batch without touching the store.
    ///
    /// Applies the same validation as an insert write and reports how many
    /// live slots would move and how much the buffer would grow.
    pub fn plan_insert(
        &self,
        ranges: &[CellRange],
        sources: &[&[u8]],
    ) -> Result<InsertPlan, StoreError> {
        let batch = self.prepare_batch(ranges, sources)?;
        self.dry_run(&batch, sources)
    }

    fn dry_run(&self, batch: &RangeBatch, sources: &[&[u8]]) -> Result<InsertPlan, StoreError> {
        if !self.is_allocated() {
            return Err(StoreError::InsertOnEmpty);
        }
        let capacity = self.capacity();
        let reusable = self.trailing_free();
        let mut mask = LivenessMask::snapshot(self, &self.pattern, self.occupancy.is_tracked());
        let mut required = 0;
        for i in batch.ascending_order() {
            let range = &batch.ranges()[i];
            range.check_bounds(mask.slot_count())?;
            required += displace(&mut mask, range).required;
            mask.land(range, sources[i]);
        }
        let needed_capacity = mask.slot_count();
        let growth = match needed_capacity.saturating_sub(capacity) {
            0 => 0,
            shortfall => shortfall + self.config.pre_allocation_slack,
        };
        Ok(InsertPlan {
            required,
            reusable,
            needed_capacity,
            growth,
        })
    }

    /// Insert-mode write of an already normalized batch.
    pub(crate) fn insert_batch(
        &mut self,
        batch: &RangeBatch,
        sources: &[&[u8]],
    ) -> Result<(), StoreError> {
        let plan = self.dry_run(batch, sources)?;
        trace!(
            ranges = batch.len(),
            required = plan.required,
            reusable = plan.reusable,
            growth = plan.growth,
            "insertion plan"
        );
        if plan.growth > 0 {
            self.grow_by(plan.needed_capacity - self.capacity())?;
        }
        let mut moved = 0;
        for i in batch.ascending_order() {
            let range = &batch.ranges()[i];
            moved += displace(self, range).moved;
            self.land(range, sources[i]);
        }
        trace!(moved, capacity = self.capacity(), "insertion applied");
        Ok(())
    }
}
