//! A type-erased resizable array of fixed-width records.
//!
//! [`CellStore`] keeps no element count. Every slot not holding user data
//! is filled with a sentinel byte pattern, and liveness is read off the
//! slot itself (or, in tracked mode, off a parallel occupancy bit).
//!
//! # Operations
//!
//! ```text
//! write(Overwrite) ── normalize ─ ensure capacity ─ copy
//! write(Insert)    ── normalize ─ dry run ─ grow once ─ displace + copy
//! erase            ── normalize ─ sentinel-fill ─ compact ─ [shrink]
//! retrieve         ── normalize ─ copy into a new store
//! search           ── resolve direction ─ scan
//! ```
//!
//! Every operation validates its whole batch before touching the buffer,
//! and allocation goes through `try_reserve_exact`, so a returned error
//! always means the store is unchanged.
//!
//! # Views
//!
//! Slot accessors and [`CellView`] borrow the store. Any mutating call
//! needs `&mut self`, which ends those borrows first.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod capacity;
mod compact;
mod erase;
mod insert;
mod raw;
pub mod read;
mod retrieve;
pub mod search;
mod slots;
pub mod store;
mod write;

pub use insert::InsertPlan;
pub use read::CellView;
pub use search::SearchResult;
pub use store::CellStore;
