//! The sentinel pattern that marks unused slots.

use std::fmt;

/// A `width`-byte value written into every slot that holds no user data.
///
/// In sentinel liveness mode, equality with this pattern is the only test
/// of whether a slot is in use.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SentinelPattern {
    bytes: Box<[u8]>,
}

impl SentinelPattern {
    /// A pattern of `width` copies of `fill_byte`.
    pub fn filled(width: usize, fill_byte: u8) -> Self {
        Self {
            bytes: vec![fill_byte; width].into_boxed_slice(),
        }
    }

    /// A pattern with explicit per-byte content.
    pub fn from_bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Width of the pattern, equal to the cell width of its store.
    pub fn width(&self) -> usize {
        self.bytes.len()
    }

    /// The raw pattern bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether `cell` is byte-for-byte equal to the pattern.
    #[inline]
    pub fn is_sentinel(&self, cell: &[u8]) -> bool {
        *cell == *self.bytes
    }

    /// Overwrite every cell of `region` with the pattern.
    ///
    /// `region.len()` must be a multiple of the pattern width.
    pub fn fill(&self, region: &mut [u8]) {
        debug_assert_eq!(region.len() % self.width().max(1), 0);
        if let Some(&first) = self.bytes.first() {
            if self.bytes.iter().all(|&b| b == first) {
                region.fill(first);
                return;
            }
        }
        for cell in region.chunks_exact_mut(self.width()) {
            cell.copy_from_slice(&self.bytes);
        }
    }
}

impl fmt::Debug for SentinelPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SentinelPattern(")?;
        for b in self.bytes.iter() {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}
