//! Search: scan ranges, each in its own direction, for any target value.

use cellstore_core::{CellRange, DirectedRange, SearchResultKind, StoreError};
use smallvec::SmallVec;

use crate::store::CellStore;

/// Outcome of [`CellStore::search`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchResult {
    /// Absolute slot index of the first match, or `None`.
    Index(Option<usize>),
    /// Whether any slot matched.
    Contains(bool),
}

impl SearchResult {
    fn new(kind: SearchResultKind, hit: Option<usize>) -> Self {
        match kind {
            SearchResultKind::Index => Self::Index(hit),
            SearchResultKind::Boolean => Self::Contains(hit.is_some()),
        }
    }

    /// The matching index, if this is an index result that found one.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Index(hit) => hit,
            Self::Contains(_) => None,
        }
    }

    /// Whether anything matched.
    pub fn found(self) -> bool {
        match self {
            Self::Index(hit) => hit.is_some(),
            Self::Contains(found) => found,
        }
    }

    /// Integer encoding: the index or `-1` for index results, `1` or `0`
    /// for boolean results.
    pub fn to_raw(self) -> isize {
        match self {
            Self::Index(Some(i)) => isize::try_from(i).unwrap_or(isize::MAX),
            Self::Index(None) => -1,
            Self::Contains(found) => isize::from(found),
        }
    }
}

impl CellStore {
    /// Scan `ranges` in order for the first slot equal to any cell in
    /// `targets`.
    ///
    /// `targets` is a flat run of one or more cells. Each range is scanned
    /// in its own direction: ascending when `start <= end`, descending
    /// otherwise. Slots are compared by raw bytes, so a sentinel target
    /// matches unused slots. Zero ranges is a plain miss.
    pub fn search(
        &self,
        ranges: &[CellRange],
        targets: &[u8],
        kind: SearchResultKind,
    ) -> Result<SearchResult, StoreError> {
        let width = self.cell_width();
        if targets.is_empty() {
            return Err(StoreError::EmptyTargetSet);
        }
        if targets.len() % width != 0 {
            return Err(StoreError::LengthMismatch {
                expected: targets.len().div_ceil(width) * width,
                actual: targets.len(),
            });
        }
        let capacity = self.capacity();
        let directed = ranges
            .iter()
            .map(|r| r.directed(capacity))
            .collect::<Result<SmallVec<[DirectedRange; 4]>, StoreError>>()?;

        let hit = directed.iter().flat_map(DirectedRange::indices).find(|&slot| {
            let cell = self.cells.slot(slot);
            targets.chunks_exact(width).any(|t| t == cell)
        });
        Ok(SearchResult::new(kind, hit))
    }

    /// Search one range using the configured result kind.
    pub fn search_in(
        &self,
        range: impl Into<CellRange>,
        targets: &[u8],
    ) -> Result<SearchResult, StoreError> {
        self.search(&[range.into()], targets, self.config.search_result)
    }
}
