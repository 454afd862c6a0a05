//! cellstore: resizable arrays of fixed-width opaque records.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all cellstore sub-crates. For most users, adding `cellstore` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cellstore::prelude::*;
//!
//! // 4-byte cells; unused slots hold 0xFFFF_FFFF.
//! let mut store = CellStore::new(4).unwrap();
//! let data: Vec<u8> = [10i32, 20, 30].iter().flat_map(|v| v.to_le_bytes()).collect();
//! store.overwrite(CellRange::new(0, 2), &data).unwrap();
//!
//! // Insert displaces 20 and 30 instead of overwriting 20.
//! store.insert(CellRange::single(1), &99i32.to_le_bytes()).unwrap();
//! assert_eq!(store.capacity(), 4);
//!
//! let hit = store
//!     .search(&[CellRange::new(0, -1)], &30i32.to_le_bytes(), SearchResultKind::Index)
//!     .unwrap();
//! assert_eq!(hit, SearchResult::Index(Some(3)));
//!
//! // Erase 99 and give the freed slot back.
//! store.erase(&[CellRange::single(1)], true).unwrap();
//! assert_eq!(store.capacity(), 3);
//! assert_eq!(store.view().live().count(), 3);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cellstore-core` | Errors, configuration, ranges, sentinel pattern |
//! | [`array`] | `cellstore-array` | `CellStore`, `CellView`, `SearchResult` |
//! | [`list`] | `cellstore-list` | `CellList`, `NodeHandle`, `Cursor` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types shared by every crate (`cellstore-core`).
///
/// Contains [`types::StoreError`], [`types::StoreConfig`], the range
/// types and [`types::SentinelPattern`].
pub use cellstore_core as types;

/// The cell store itself (`cellstore-array`).
pub use cellstore_array as array;

/// Doubly linked list of cell stores (`cellstore-list`).
///
/// Nodes are addressed by generational [`list::NodeHandle`]s that are
/// rejected once their node is removed.
pub use cellstore_list as list;

/// Common imports for typical cellstore usage.
///
/// ```rust
/// use cellstore::prelude::*;
/// ```
pub mod prelude {
    // Store
    pub use cellstore_array::{CellStore, CellView, InsertPlan, SearchResult};

    // Configuration and ranges
    pub use cellstore_core::{
        CellRange, EraseMode, Liveness, SearchResultKind, SentinelPattern, StoreConfig, WriteMode,
    };

    // Errors
    pub use cellstore_core::{ConfigError, StoreError};

    // List
    pub use cellstore_list::{CellList, Cursor, ListError, NodeHandle};
}
