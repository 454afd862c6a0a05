//! Generational node handles.
//!
//! A [`NodeHandle`] names an arena slot plus the generation the slot had
//! when the node was created. Removing a node bumps the slot's generation,
//! so every outstanding handle to it fails the O(1) staleness check
//! instead of silently resolving to whatever node reuses the slot.

use std::fmt;

/// Checked reference to one node of a [`crate::CellList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct NodeHandle {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeHandle {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot of the node.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Slot generation when the node was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle(slot={}, gen={})", self.index, self.generation)
    }
}
