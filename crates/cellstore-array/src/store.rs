//! The cell store: owned slot buffer plus its sentinel and configuration.
//!
//! [`CellStore`] holds no live-element counter. Whether a slot is in use is
//! read off the slot itself (sentinel mode) or off a parallel occupancy bit
//! (tracked mode); see [`Liveness`].

use cellstore_core::{
    Liveness, NormalizedRange, SentinelPattern, StoreConfig, StoreError,
};

use crate::raw::RawCells;
use crate::read::CellView;
use crate::slots::{Occupancy, SlotModel};

/// A resizable array of fixed-width opaque records.
///
/// Created empty (capacity 0, no buffer). The first write allocates; later
/// writes, inserts and erases may grow, shift, compact or shrink the
/// buffer. Every slot holds either the sentinel pattern or user data.
///
/// # Views
///
/// [`CellStore::view`], [`CellStore::slot`] and [`CellStore::as_bytes`]
/// borrow the store, so the borrow checker ends them before any mutating
/// call can move or reallocate the buffer underneath.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellStore {
    pub(crate) cells: RawCells,
    pub(crate) pattern: SentinelPattern,
    pub(crate) occupancy: Occupancy,
    pub(crate) config: StoreConfig,
}

impl CellStore {
    /// Create an empty store of `width`-byte cells with default config.
    pub fn new(width: usize) -> Result<Self, StoreError> {
        Self::with_config(width, StoreConfig::default())
    }

    /// Create an empty store of `width`-byte cells.
    ///
    /// Fails with `InvalidWidth` if `width` is zero or above
    /// `config.max_cell_width`.
    pub fn with_config(width: usize, config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        check_width(width, &config)?;
        let pattern = SentinelPattern::filled(width, config.fill_byte);
        Ok(Self::from_parts(RawCells::new(width), pattern, config))
    }

    /// Create an empty store whose unused slots hold `pattern`.
    ///
    /// The cell width is the pattern width; `config.fill_byte` is ignored.
    pub fn with_pattern(pattern: SentinelPattern, config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        check_width(pattern.width(), &config)?;
        Ok(Self::from_parts(RawCells::new(pattern.width()), pattern, config))
    }

    /// Create a store holding `bytes` as consecutive cells.
    ///
    /// Capacity is `bytes.len() / width`. Cells equal to the sentinel
    /// pattern count as unused in either liveness mode.
    pub fn from_bytes(
        width: usize,
        bytes: impl Into<Vec<u8>>,
        config: StoreConfig,
    ) -> Result<Self, StoreError> {
        config.validate()?;
        check_width(width, &config)?;
        let bytes = bytes.into();
        if bytes.len() % width != 0 {
            return Err(StoreError::LengthMismatch {
                expected: bytes.len().div_ceil(width) * width,
                actual: bytes.len(),
            });
        }
        let pattern = SentinelPattern::filled(width, config.fill_byte);
        let occupancy = Occupancy::from_cells(config.liveness, &bytes, &pattern);
        Ok(Self {
            cells: RawCells::from_vec(width, bytes),
            pattern,
            occupancy,
            config,
        })
    }

    fn from_parts(cells: RawCells, pattern: SentinelPattern, config: StoreConfig) -> Self {
        Self {
            cells,
            pattern,
            occupancy: Occupancy::new(config.liveness),
            config,
        }
    }

    /// Number of slots backing the buffer (not the number in use).
    pub fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    /// Width of one cell in bytes.
    pub fn cell_width(&self) -> usize {
        self.cells.width()
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The pattern written into unused slots.
    pub fn pattern(&self) -> &SentinelPattern {
        &self.pattern
    }

    /// The liveness model in effect.
    pub fn liveness(&self) -> Liveness {
        self.config.liveness
    }

    /// Whether a backing buffer exists.
    pub fn is_allocated(&self) -> bool {
        self.capacity() > 0
    }

    /// Whether `slot` exists and holds user data.
    pub fn is_live(&self, slot: usize) -> bool {
        slot < self.capacity() && SlotModel::is_live(self, slot)
    }

    /// Number of live slots. O(capacity).
    pub fn live_len(&self) -> usize {
        self.live_in(0, self.capacity().saturating_sub(1))
    }

    /// Index of the last live slot.
    pub fn live_tail(&self) -> Option<usize> {
        SlotModel::live_tail(self)
    }

    /// Number of unused slots after the last live one. These are reused
    /// by inserts and appends before the buffer grows.
    pub fn trailing_free(&self) -> usize {
        SlotModel::trailing_free(self)
    }

    /// Bytes of one slot, or `None` past the capacity.
    pub fn slot(&self, slot: usize) -> Option<&[u8]> {
        (slot < self.capacity()).then(|| self.cells.slot(slot))
    }

    /// The whole buffer, `capacity * cell_width` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.cells.as_bytes()
    }

    /// A read-only view over the current buffer.
    pub fn view(&self) -> CellView<'_> {
        CellView::new(self)
    }

    /// Release the buffer, returning to capacity 0.
    pub fn clear(&mut self) {
        self.cells.release();
        self.occupancy.resize(0);
    }
}

fn check_width(width: usize, config: &StoreConfig) -> Result<(), StoreError> {
    if width == 0 || width > config.max_cell_width {
        return Err(StoreError::InvalidWidth {
            width,
            max: config.max_cell_width,
        });
    }
    Ok(())
}

impl SlotModel for CellStore {
    fn slot_count(&self) -> usize {
        self.cells.capacity()
    }

    #[inline]
    fn is_live(&self, slot: usize) -> bool {
        match self.occupancy.get(slot) {
            Some(live) => live,
            None => !self.pattern.is_sentinel(self.cells.slot(slot)),
        }
    }

    fn relocate(&mut self, from: usize, to: usize) {
        self.cells.copy_slot(from, to);
        if let Some(live) = self.occupancy.get(from) {
            self.occupancy.set(to, live);
        }
    }

    fn vacate(&mut self, start: usize, end: usize) {
        self.pattern
            .fill(self.cells.slots_mut(start, end - start + 1));
        self.occupancy.set_span(start, end, false);
    }

    fn cover(&mut self, slots: usize) {
        debug_assert!(
            slots <= self.cells.capacity(),
            "buffer must be grown before relocation"
        );
    }

    fn land(&mut self, range: &NormalizedRange, source: &[u8]) {
        let width = self.cells.width();
        let dest = self.cells.slots_mut(range.start, range.len());
        if range.reversed {
            for (d, s) in dest
                .chunks_exact_mut(width)
                .zip(source.chunks_exact(width).rev())
            {
                d.copy_from_slice(s);
            }
        } else {
            dest.copy_from_slice(source);
        }
        self.occupancy.set_span(range.start, range.end, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_unallocated() {
        let store = CellStore::new(4).unwrap();
        assert_eq!(store.capacity(), 0);
        assert_eq!(store.cell_width(), 4);
        assert!(!store.is_allocated());
        assert_eq!(store.live_len(), 0);
        assert_eq!(store.live_tail(), None);
        assert!(store.slot(0).is_none());
        assert_eq!(store.pattern().as_bytes(), &[0xFF; 4]);
    }

    #[test]
    fn zero_width_rejected() {
        assert_eq!(
            CellStore::new(0).unwrap_err(),
            StoreError::InvalidWidth {
                width: 0,
                max: StoreConfig::DEFAULT_MAX_CELL_WIDTH
            }
        );
    }

    #[test]
    fn oversized_width_rejected() {
        let config = StoreConfig::new().with_max_cell_width(8);
        assert!(matches!(
            CellStore::with_config(9, config),
            Err(StoreError::InvalidWidth { width: 9, max: 8 })
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = StoreConfig::new().with_max_cell_width(0);
        assert!(matches!(
            CellStore::with_config(4, config),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn from_bytes_infers_liveness_from_pattern() {
        let store =
            CellStore::from_bytes(2, vec![1, 2, 0xFF, 0xFF, 3, 4], StoreConfig::default()).unwrap();
        assert_eq!(store.capacity(), 3);
        assert!(store.is_live(0));
        assert!(!store.is_live(1));
        assert!(store.is_live(2));
        assert!(!store.is_live(3));
        assert_eq!(store.live_len(), 2);
        assert_eq!(store.live_tail(), Some(2));
        assert_eq!(store.trailing_free(), 0);
    }

    #[test]
    fn from_bytes_rejects_partial_cell() {
        assert_eq!(
            CellStore::from_bytes(4, vec![0u8; 6], StoreConfig::default()).unwrap_err(),
            StoreError::LengthMismatch {
                expected: 8,
                actual: 6
            }
        );
    }

    #[test]
    fn custom_pattern_sets_width() {
        let pattern = SentinelPattern::from_bytes(vec![0u8, 0, 0, 0x80]);
        let store = CellStore::with_pattern(pattern, StoreConfig::default()).unwrap();
        assert_eq!(store.cell_width(), 4);
    }

    #[test]
    fn clear_releases_buffer() {
        let mut store =
            CellStore::from_bytes(1, vec![1, 2, 3], StoreConfig::default()).unwrap();
        store.clear();
        assert_eq!(store.capacity(), 0);
        assert!(store.as_bytes().is_empty());
    }
}
