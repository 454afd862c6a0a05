//! Range normalization for batched slot operations.
//!
//! Callers address slots with signed, inclusive `(start, end)` pairs:
//!
//! - `-1` in either field means "the last slot" (`capacity - 1`).
//! - Any other negative value is rejected.
//! - `start > end` is accepted and flagged as *reversed*: writes copy the
//!   source into the range back to front.
//!
//! A batch is normalized once, up front, so that every later phase of an
//! operation works on plain `usize` spans and a single `highest_end`.

use smallvec::SmallVec;

use crate::error::StoreError;

/// A caller-facing inclusive slot range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// First slot, or `-1` for the last slot.
    pub start: isize,
    /// Last slot, or `-1` for the last slot.
    pub end: isize,
}

impl CellRange {
    /// The "last slot" marker.
    pub const LAST: isize = -1;

    /// Create a range covering `start..=end`.
    pub const fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one slot.
    pub const fn single(index: isize) -> Self {
        Self::new(index, index)
    }

    /// A range covering the last slot of the store.
    pub const fn last() -> Self {
        Self::new(Self::LAST, Self::LAST)
    }

    fn resolve(self, value: isize, capacity: usize) -> Result<usize, StoreError> {
        match value {
            Self::LAST if capacity > 0 => Ok(capacity - 1),
            v if v >= 0 => Ok(v as usize),
            _ => Err(StoreError::InvalidRange {
                start: self.start,
                end: self.end,
            }),
        }
    }

    /// Resolve `-1` markers and order the pair, remembering whether it was
    /// given back to front.
    pub fn normalize(self, capacity: usize) -> Result<NormalizedRange, StoreError> {
        let a = self.resolve(self.start, capacity)?;
        let b = self.resolve(self.end, capacity)?;
        Ok(if a > b {
            NormalizedRange {
                start: b,
                end: a,
                reversed: true,
            }
        } else {
            NormalizedRange {
                start: a,
                end: b,
                reversed: false,
            }
        })
    }

    /// Resolve `-1` markers but keep the caller's direction.
    ///
    /// Both ends must lie inside `capacity`.
    pub fn directed(self, capacity: usize) -> Result<DirectedRange, StoreError> {
        let from = self.resolve(self.start, capacity)?;
        let to = self.resolve(self.end, capacity)?;
        if from.max(to) >= capacity {
            return Err(StoreError::RangeOutOfBounds {
                start: from.min(to),
                end: from.max(to),
                capacity,
            });
        }
        Ok(DirectedRange { from, to })
    }
}

impl From<(isize, isize)> for CellRange {
    fn from((start, end): (isize, isize)) -> Self {
        Self::new(start, end)
    }
}

/// An ordered, resolved slot range (`start <= end`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedRange {
    /// First slot.
    pub start: usize,
    /// Last slot (inclusive).
    pub end: usize,
    /// The caller supplied the pair as `end, start`.
    pub reversed: bool,
}

impl NormalizedRange {
    /// Number of slots covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false: a normalized range covers at least one slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `slot` lies inside the range.
    pub fn contains(&self, slot: usize) -> bool {
        self.start <= slot && slot <= self.end
    }

    /// Whether the two ranges share a slot.
    pub fn overlaps(&self, other: &NormalizedRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Fail with `RangeOutOfBounds` if the range reaches past `capacity`.
    pub fn check_bounds(&self, capacity: usize) -> Result<(), StoreError> {
        if self.end >= capacity {
            return Err(StoreError::RangeOutOfBounds {
                start: self.start,
                end: self.end,
                capacity,
            });
        }
        Ok(())
    }
}

/// A resolved range that keeps its scan direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectedRange {
    /// First slot visited.
    pub from: usize,
    /// Last slot visited.
    pub to: usize,
}

impl DirectedRange {
    /// Whether the scan runs toward higher indices.
    pub fn ascending(&self) -> bool {
        self.from <= self.to
    }

    /// Number of slots visited.
    pub fn len(&self) -> usize {
        self.from.abs_diff(self.to) + 1
    }

    /// Always false: a directed range visits at least one slot.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Slot indices in visiting order.
    pub fn indices(&self) -> DirectedIndices {
        DirectedIndices {
            next: Some(self.from),
            to: self.to,
            ascending: self.ascending(),
        }
    }
}

/// Iterator over the slots of a [`DirectedRange`].
#[derive(Clone, Debug)]
pub struct DirectedIndices {
    next: Option<usize>,
    to: usize,
    ascending: bool,
}

impl Iterator for DirectedIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = if current == self.to {
            None
        } else if self.ascending {
            Some(current + 1)
        } else {
            Some(current - 1)
        };
        Some(current)
    }
}

/// A normalized batch of ranges in caller order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeBatch {
    ranges: SmallVec<[NormalizedRange; 4]>,
    highest_end: Option<usize>,
}

impl RangeBatch {
    /// Normalize every range against `capacity` and reject overlaps.
    ///
    /// Bounds are not checked here: overwrite writes may reach past the
    /// current capacity. Use [`RangeBatch::check_bounds`] for operations
    /// that cannot grow the store.
    pub fn normalize(ranges: &[CellRange], capacity: usize) -> Result<Self, StoreError> {
        let batch = Self::normalize_overlapping(ranges, capacity)?;
        batch.reject_overlaps()?;
        Ok(batch)
    }

    /// Like [`RangeBatch::normalize`], but ranges may share slots.
    ///
    /// For operations where touching a slot twice is harmless, such as
    /// freeing it.
    pub fn normalize_overlapping(
        ranges: &[CellRange],
        capacity: usize,
    ) -> Result<Self, StoreError> {
        let mut normalized = SmallVec::with_capacity(ranges.len());
        let mut highest_end = None;
        for range in ranges {
            let n = range.normalize(capacity)?;
            highest_end = Some(highest_end.map_or(n.end, |h: usize| h.max(n.end)));
            normalized.push(n);
        }
        Ok(Self {
            ranges: normalized,
            highest_end,
        })
    }

    fn reject_overlaps(&self) -> Result<(), StoreError> {
        let order = self.ascending_order();
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if self.ranges[a].overlaps(&self.ranges[b]) {
                return Err(StoreError::OverlappingRanges {
                    first: a.min(b),
                    second: a.max(b),
                });
            }
        }
        Ok(())
    }

    /// Caller positions of the ranges, sorted by ascending `start`.
    ///
    /// Ties keep caller order.
    pub fn ascending_order(&self) -> SmallVec<[usize; 8]> {
        let mut order: SmallVec<[usize; 8]> = (0..self.ranges.len()).collect();
        order.sort_by_key(|&i| self.ranges[i].start);
        order
    }

    /// Fail with `RangeOutOfBounds` on the first range past `capacity`.
    pub fn check_bounds(&self, capacity: usize) -> Result<(), StoreError> {
        self.ranges.iter().try_for_each(|r| r.check_bounds(capacity))
    }

    /// The normalized ranges in caller order.
    pub fn ranges(&self) -> &[NormalizedRange] {
        &self.ranges
    }

    /// Number of ranges in the batch.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the batch holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Largest `end` across the batch, or `None` for an empty batch.
    pub fn highest_end(&self) -> Option<usize> {
        self.highest_end
    }

    /// Total number of slots covered by the batch.
    pub fn total_len(&self) -> usize {
        self.ranges.iter().map(NormalizedRange::len).sum()
    }
}
