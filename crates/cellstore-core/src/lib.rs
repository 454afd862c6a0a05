//! Core types for sentinel-based cell stores.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces every other crate in the workspace agrees on: the error taxonomy,
//! store configuration, the sentinel pattern that marks unused slots, and
//! the range normalizer that turns caller-facing `(start, end)` pairs into
//! validated slot spans.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pattern;
pub mod range;

pub use config::{ConfigError, EraseMode, Liveness, SearchResultKind, StoreConfig, WriteMode};
pub use error::StoreError;
pub use pattern::SentinelPattern;
pub use range::{CellRange, DirectedRange, NormalizedRange, RangeBatch};
