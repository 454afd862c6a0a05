//! Store configuration parameters.

use std::error::Error;
use std::fmt;

/// How a write treats live data already sitting in the destination range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace whatever occupies the destination slots.
    #[default]
    Overwrite,
    /// Displace live slots in the destination toward the tail, preserving
    /// their relative order, then write into the vacated range.
    Insert,
}

/// What a configured erase does with the capacity it frees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EraseMode {
    /// Compact, then reallocate down to the live length.
    #[default]
    Shrink,
    /// Compact and keep the freed slots as sentinel padding at the tail.
    Retain,
}

impl EraseMode {
    /// Whether this mode releases capacity after compaction.
    pub fn shrinks(self) -> bool {
        matches!(self, Self::Shrink)
    }
}

/// Shape of a configured search result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchResultKind {
    /// The absolute slot index of the first match.
    #[default]
    Index,
    /// Whether any slot matched.
    Boolean,
}

/// How the store decides whether a slot holds user data.
///
/// [`Liveness::Sentinel`] is the default: with no tracking requested, the
/// sentinel pattern is the store's only liveness test. Prefer
/// [`Liveness::Tracked`] whenever stored values can equal the pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Liveness {
    /// A slot is live when its bytes differ from the sentinel pattern.
    ///
    /// A stored value that happens to equal the pattern is
    /// indistinguishable from an unused slot and will be treated as free
    /// by insertion, compaction and shrinking.
    #[default]
    Sentinel,
    /// A per-slot occupancy bit decides liveness. Unused slots are still
    /// sentinel-filled, but written data equal to the pattern stays live.
    Tracked,
}

/// Configuration for a cell store.
///
/// Set at construction and immutable afterwards. Defaults match the
/// classic sentinel store: `0xFF` fill, overwrite writes, shrinking erases
/// and index-valued searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Extra slots reserved beyond the minimum whenever the buffer grows.
    ///
    /// Default: 0. Must not exceed [`StoreConfig::MAX_PRE_ALLOCATION_SLACK`].
    pub pre_allocation_slack: usize,

    /// Byte repeated across a cell to form the sentinel pattern.
    ///
    /// Default: `0xFF`.
    pub fill_byte: u8,

    /// Mode used by single-range writes that do not name one.
    pub write_mode: WriteMode,

    /// Mode used by configured erase calls.
    pub erase_mode: EraseMode,

    /// Result shape used by configured search calls.
    pub search_result: SearchResultKind,

    /// Largest accepted cell width in bytes.
    ///
    /// Default: 4096. Must be at least 1.
    pub max_cell_width: usize,

    /// Liveness model for the store.
    pub liveness: Liveness,
}

impl StoreConfig {
    /// Default sentinel fill byte.
    pub const DEFAULT_FILL_BYTE: u8 = 0xFF;

    /// Default maximum cell width in bytes.
    pub const DEFAULT_MAX_CELL_WIDTH: usize = 4096;

    /// Upper bound on pre-allocation slack.
    pub const MAX_PRE_ALLOCATION_SLACK: usize = 1 << 24;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            pre_allocation_slack: 0,
            fill_byte: Self::DEFAULT_FILL_BYTE,
            write_mode: WriteMode::Overwrite,
            erase_mode: EraseMode::Shrink,
            search_result: SearchResultKind::Index,
            max_cell_width: Self::DEFAULT_MAX_CELL_WIDTH,
            liveness: Liveness::Sentinel,
        }
    }

    /// Set the pre-allocation slack.
    pub fn with_slack(mut self, slack: usize) -> Self {
        self.pre_allocation_slack = slack;
        self
    }

    /// Set the sentinel fill byte.
    pub fn with_fill_byte(mut self, fill_byte: u8) -> Self {
        self.fill_byte = fill_byte;
        self
    }

    /// Set the default write mode.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Set the default erase mode.
    pub fn with_erase_mode(mut self, mode: EraseMode) -> Self {
        self.erase_mode = mode;
        self
    }

    /// Set the default search result kind.
    pub fn with_search_result(mut self, kind: SearchResultKind) -> Self {
        self.search_result = kind;
        self
    }

    /// Set the maximum accepted cell width.
    pub fn with_max_cell_width(mut self, max: usize) -> Self {
        self.max_cell_width = max;
        self
    }

    /// Set the liveness model.
    pub fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = liveness;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cell_width == 0 {
            return Err(ConfigError::ZeroMaxCellWidth);
        }
        if self.pre_allocation_slack > Self::MAX_PRE_ALLOCATION_SLACK {
            return Err(ConfigError::SlackTooLarge {
                slack: self.pre_allocation_slack,
                max: Self::MAX_PRE_ALLOCATION_SLACK,
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`StoreConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_cell_width` is zero, so no width could ever be accepted.
    ZeroMaxCellWidth,
    /// `pre_allocation_slack` exceeds the supported maximum.
    SlackTooLarge {
        /// The configured slack.
        slack: usize,
        /// The supported maximum.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxCellWidth => write!(f, "max_cell_width must be at least 1"),
            Self::SlackTooLarge { slack, max } => {
                write!(f, "pre_allocation_slack {slack} exceeds maximum of {max}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_store() {
        let config = StoreConfig::default();
        assert_eq!(config.pre_allocation_slack, 0);
        assert_eq!(config.fill_byte, 0xFF);
        assert_eq!(config.write_mode, WriteMode::Overwrite);
        assert_eq!(config.erase_mode, EraseMode::Shrink);
        assert_eq!(config.search_result, SearchResultKind::Index);
        assert_eq!(config.liveness, Liveness::Sentinel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn liveness_defaults_to_sentinel() {
        assert_eq!(Liveness::default(), Liveness::Sentinel);
        assert_eq!(StoreConfig::default().liveness, Liveness::default());
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = StoreConfig::new()
            .with_slack(3)
            .with_fill_byte(0)
            .with_write_mode(WriteMode::Insert)
            .with_erase_mode(EraseMode::Retain)
            .with_search_result(SearchResultKind::Boolean)
            .with_max_cell_width(16)
            .with_liveness(Liveness::Tracked);
        assert_eq!(config.pre_allocation_slack, 3);
        assert_eq!(config.fill_byte, 0);
        assert_eq!(config.write_mode, WriteMode::Insert);
        assert!(!config.erase_mode.shrinks());
        assert_eq!(config.search_result, SearchResultKind::Boolean);
        assert_eq!(config.max_cell_width, 16);
        assert_eq!(config.liveness, Liveness::Tracked);
    }

    #[test]
    fn zero_max_width_rejected() {
        let config = StoreConfig::new().with_max_cell_width(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxCellWidth));
    }

    #[test]
    fn oversized_slack_rejected() {
        let slack = StoreConfig::MAX_PRE_ALLOCATION_SLACK + 1;
        let config = StoreConfig::new().with_slack(slack);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SlackTooLarge { .. })
        ));
    }
}
