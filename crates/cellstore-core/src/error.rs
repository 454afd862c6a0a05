//! Error types for cell store operations.
//!
//! Every operation validates its inputs in full before touching the buffer,
//! so any error below means the store is byte-for-byte unchanged.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Errors returned by cell store operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A range index is negative and not the `-1` last-slot marker, or
    /// `-1` was used on a store with no slots to refer to.
    InvalidRange {
        /// Start index as supplied by the caller.
        start: isize,
        /// End index as supplied by the caller.
        end: isize,
    },
    /// A range reaches past the current capacity of an operation that
    /// cannot grow the store.
    RangeOutOfBounds {
        /// Normalized start slot.
        start: usize,
        /// Normalized end slot.
        end: usize,
        /// Store capacity at the time of the call.
        capacity: usize,
    },
    /// Insert mode was requested on a store with no backing buffer.
    InsertOnEmpty,
    /// The backing buffer could not be allocated or extended.
    OutOfMemory {
        /// Slot count the store tried to reach.
        requested_slots: usize,
        /// Width of one slot in bytes.
        cell_width: usize,
    },
    /// Cell width is zero or above the configured maximum.
    InvalidWidth {
        /// The rejected width.
        width: usize,
        /// The configured maximum width.
        max: usize,
    },
    /// A search was given no target values.
    EmptyTargetSet,
    /// A source or target buffer does not hold a whole number of cells
    /// matching what the range or width requires.
    LengthMismatch {
        /// Expected length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },
    /// The number of sources does not match the number of ranges.
    BatchMismatch {
        /// Number of ranges in the batch.
        ranges: usize,
        /// Number of sources in the batch.
        sources: usize,
    },
    /// Two ranges of one batch cover a common slot.
    OverlappingRanges {
        /// Position of the earlier range in the batch.
        first: usize,
        /// Position of the later range in the batch.
        second: usize,
    },
    /// The store configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "invalid range [{start}, {end}]")
            }
            Self::RangeOutOfBounds {
                start,
                end,
                capacity,
            } => {
                write!(
                    f,
                    "range [{start}, {end}] out of bounds for capacity {capacity}"
                )
            }
            Self::InsertOnEmpty => write!(f, "cannot insert into an unallocated store"),
            Self::OutOfMemory {
                requested_slots,
                cell_width,
            } => {
                write!(
                    f,
                    "out of memory: could not hold {requested_slots} slots of {cell_width} bytes"
                )
            }
            Self::InvalidWidth { width, max } => {
                write!(f, "invalid cell width {width} (must be 1..={max})")
            }
            Self::EmptyTargetSet => write!(f, "search target set is empty"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected} bytes, got {actual}")
            }
            Self::BatchMismatch { ranges, sources } => {
                write!(f, "batch has {ranges} ranges but {sources} sources")
            }
            Self::OverlappingRanges { first, second } => {
                write!(f, "ranges {first} and {second} of the batch overlap")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
