//! A doubly linked list of cell stores.
//!
//! Each node owns one [`cellstore_array::CellStore`] and the list talks to
//! it only through the store's public operations. Nodes sit in a slot arena
//! and are addressed by generational [`NodeHandle`]s:
//!
//! ```text
//! CellList
//! ├── slots: [Slot { generation, node: Option<Node> }]
//! │          Node { store, prev, next }
//! ├── free:  reusable slot indices
//! └── head / tail
//! ```
//!
//! A handle or [`Cursor`] that outlives its node is rejected with
//! [`ListError::StaleHandle`] rather than resolving to another node.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod error;
pub mod handle;
pub mod list;

pub use cursor::Cursor;
pub use error::ListError;
pub use handle::NodeHandle;
pub use list::{CellList, Iter};
