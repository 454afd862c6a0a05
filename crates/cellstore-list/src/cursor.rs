//! A checked cursor over a [`CellList`].
//!
//! The cursor only remembers a [`NodeHandle`]. It holds no borrow of the
//! list, so the list can be mutated freely while a cursor exists; every
//! access revalidates the handle and reports a removed node as
//! [`ListError::StaleHandle`].

use cellstore_array::CellStore;

use crate::error::ListError;
use crate::handle::NodeHandle;
use crate::list::CellList;

/// A position in a [`CellList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    handle: NodeHandle,
}

impl Cursor {
    /// A cursor at `handle`. The handle is checked on first use.
    pub fn new(handle: NodeHandle) -> Self {
        Self { handle }
    }

    /// The node the cursor points at.
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Step `offset` nodes forward (positive) or backward (negative).
    ///
    /// Fails with [`ListError::CursorOutOfRange`] if the walk would leave
    /// the list; the cursor does not move in that case.
    pub fn move_by(&mut self, list: &CellList, offset: isize) -> Result<(), ListError> {
        let mut at = self.handle;
        list.get(at)?;
        for _ in 0..offset.unsigned_abs() {
            let step = if offset > 0 {
                list.next(at)?
            } else {
                list.prev(at)?
            };
            at = step.ok_or(ListError::CursorOutOfRange { offset })?;
        }
        self.handle = at;
        Ok(())
    }

    /// The store under the cursor.
    pub fn store<'a>(&self, list: &'a CellList) -> Result<&'a CellStore, ListError> {
        list.get(self.handle)
    }

    /// The store under the cursor, mutably.
    pub fn store_mut<'a>(&self, list: &'a mut CellList) -> Result<&'a mut CellStore, ListError> {
        list.get_mut(self.handle)
    }
}

impl CellList {
    /// A cursor at the first node.
    pub fn cursor_front(&self) -> Option<Cursor> {
        self.front().map(Cursor::new)
    }

    /// A cursor at the last node.
    pub fn cursor_back(&self) -> Option<Cursor> {
        self.back().map(Cursor::new)
    }
}
