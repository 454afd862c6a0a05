//! The liveness seam shared by the insertion engine and the compactor.
//!
//! Both algorithms only ever ask four things of storage: how many slots
//! exist, whether a slot is live, move one slot onto another, and free a
//! span. [`SlotModel`] captures exactly that, which lets the insertion
//! engine run once over a cheap [`LivenessMask`] to size the buffer and
//! then replay the identical moves over the real store.

use std::collections::TryReserveError;

use cellstore_core::{Liveness, NormalizedRange, SentinelPattern};

/// Slot-level view of a store used by the relocation algorithms.
pub(crate) trait SlotModel {
    /// Number of slots currently addressable.
    fn slot_count(&self) -> usize;

    /// Whether `slot` holds user data.
    fn is_live(&self, slot: usize) -> bool;

    /// Copy slot `from` onto slot `to`, liveness included. `from` keeps its
    /// contents until it is vacated or overwritten.
    fn relocate(&mut self, from: usize, to: usize);

    /// Mark every slot of `start..=end` unused.
    fn vacate(&mut self, start: usize, end: usize);

    /// Make sure at least `slots` slots are addressable.
    fn cover(&mut self, slots: usize);

    /// Write `source` into `range`, back to front if the range is reversed.
    fn land(&mut self, range: &NormalizedRange, source: &[u8]);

    /// Highest live slot, if any.
    fn live_tail(&self) -> Option<usize> {
        (0..self.slot_count()).rev().find(|&i| self.is_live(i))
    }

    /// Number of free slots after the last live one.
    fn trailing_free(&self) -> usize {
        match self.live_tail() {
            Some(tail) => self.slot_count() - tail - 1,
            None => self.slot_count(),
        }
    }

    /// Number of live slots in `start..=end`, clipped to the slot count.
    fn live_in(&self, start: usize, end: usize) -> usize {
        let end = end.min(self.slot_count().saturating_sub(1));
        if start > end || self.slot_count() == 0 {
            return 0;
        }
        (start..=end).filter(|&i| self.is_live(i)).count()
    }
}

/// Per-slot occupancy bits, present only in tracked liveness mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Occupancy {
    bits: Option<Vec<bool>>,
}

impl Occupancy {
    pub(crate) fn new(liveness: Liveness) -> Self {
        Self {
            bits: matches!(liveness, Liveness::Tracked).then(Vec::new),
        }
    }

    /// Tracked occupancy for a prefilled buffer. Cells equal to the
    /// pattern start out unused so the two modes agree on fresh data.
    pub(crate) fn from_cells(
        liveness: Liveness,
        bytes: &[u8],
        pattern: &SentinelPattern,
    ) -> Self {
        let bits = match liveness {
            Liveness::Sentinel => None,
            Liveness::Tracked => Some(
                bytes
                    .chunks_exact(pattern.width())
                    .map(|cell| !pattern.is_sentinel(cell))
                    .collect(),
            ),
        };
        Self { bits }
    }

    pub(crate) fn is_tracked(&self) -> bool {
        self.bits.is_some()
    }

    /// Tracked bit for `slot`, or `None` in sentinel mode.
    #[inline]
    pub(crate) fn get(&self, slot: usize) -> Option<bool> {
        self.bits.as_ref().map(|b| b[slot])
    }

    pub(crate) fn set(&mut self, slot: usize, live: bool) {
        if let Some(bits) = &mut self.bits {
            bits[slot] = live;
        }
    }

    pub(crate) fn set_span(&mut self, start: usize, end: usize, live: bool) {
        if let Some(bits) = &mut self.bits {
            bits[start..=end].fill(live);
        }
    }

    /// Reserve room for `slots` entries without changing the length.
    pub(crate) fn try_reserve_for(&mut self, slots: usize) -> Result<(), TryReserveError> {
        if let Some(bits) = &mut self.bits {
            if slots > bits.len() {
                bits.try_reserve_exact(slots - bits.len())?;
            }
        }
        Ok(())
    }

    /// Resize to `slots` entries; new entries are unused.
    pub(crate) fn resize(&mut self, slots: usize) {
        if let Some(bits) = &mut self.bits {
            bits.resize(slots, false);
            if bits.len() < bits.capacity() / 2 {
                bits.shrink_to_fit();
            }
        }
    }

    /// Bits for the given spans, concatenated.
    pub(crate) fn gather(&self, spans: &[NormalizedRange]) -> Self {
        Self {
            bits: self.bits.as_ref().map(|bits| {
                spans
                    .iter()
                    .flat_map(|r| bits[r.start..=r.end].iter().copied())
                    .collect()
            }),
        }
    }
}

/// A liveness-only stand-in for a store, used to dry-run relocations.
pub(crate) struct LivenessMask<'a> {
    live: Vec<bool>,
    pattern: &'a SentinelPattern,
    tracked: bool,
}

impl<'a> LivenessMask<'a> {
    pub(crate) fn snapshot(
        model: &impl SlotModel,
        pattern: &'a SentinelPattern,
        tracked: bool,
    ) -> Self {
        Self {
            live: (0..model.slot_count()).map(|i| model.is_live(i)).collect(),
            pattern,
            tracked,
        }
    }
}

impl SlotModel for LivenessMask<'_> {
    fn slot_count(&self) -> usize {
        self.live.len()
    }

    fn is_live(&self, slot: usize) -> bool {
        self.live[slot]
    }

    fn relocate(&mut self, from: usize, to: usize) {
        self.live[to] = self.live[from];
    }

    fn vacate(&mut self, start: usize, end: usize) {
        self.live[start..=end].fill(false);
    }

    fn cover(&mut self, slots: usize) {
        if slots > self.live.len() {
            self.live.resize(slots, false);
        }
    }

    fn land(&mut self, range: &NormalizedRange, source: &[u8]) {
        let width = self.pattern.width();
        for (offset, cell) in source.chunks_exact(width).enumerate() {
            let slot = if range.reversed {
                range.end - offset
            } else {
                range.start + offset
            };
            self.live[slot] = self.tracked || !self.pattern.is_sentinel(cell);
        }
    }
}
