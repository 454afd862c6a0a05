//! Error types for the node container.

use std::error::Error;
use std::fmt;

use cellstore_core::StoreError;

/// Errors returned by [`crate::CellList`] and [`crate::Cursor`] operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// The handle refers to a node that has been removed.
    StaleHandle {
        /// Arena slot the handle points at.
        index: usize,
        /// Generation recorded in the handle.
        generation: u32,
    },
    /// The list has no nodes.
    Empty,
    /// A cursor move would leave the list.
    CursorOutOfRange {
        /// The requested offset.
        offset: isize,
    },
    /// Building a node's store failed.
    Store(StoreError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle { index, generation } => {
                write!(f, "stale node handle: slot {index}, generation {generation}")
            }
            Self::Empty => write!(f, "list is empty"),
            Self::CursorOutOfRange { offset } => {
                write!(f, "cursor move by {offset} leaves the list")
            }
            Self::Store(e) => write!(f, "node store: {e}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ListError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_chain() {
        let err = ListError::from(StoreError::InsertOnEmpty);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("node store:"));
        assert!(ListError::Empty.source().is_none());
    }

    #[test]
    fn display_names_handle() {
        let err = ListError::StaleHandle {
            index: 3,
            generation: 7,
        };
        assert_eq!(err.to_string(), "stale node handle: slot 3, generation 7");
    }
}
