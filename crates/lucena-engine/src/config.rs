//! Engine configuration with shipping defaults.

use std::time::Duration;

/// Tunable engine parameters.
///
/// Every field has a shipping default; the driver overrides only what it
/// needs. Pruning margins and reduction formulas are deliberately not here —
/// they are named constants next to the search code that uses them.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on iterative-deepening depth.
    pub max_depth: i32,
    /// Soft wall-clock budget per search.
    pub time_limit: Duration,
    /// Transposition table capacity in megabytes.
    pub tt_size_mb: usize,
    /// Whether to consult the opening book at the root.
    pub use_opening_book: bool,
    /// Fullmove number up to which book lookups are still attempted.
    pub max_book_moves: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            time_limit: Duration::from_secs(10),
            tt_size_mb: 64,
            use_opening_book: false,
            max_book_moves: 12,
        }
    }
}

impl EngineConfig {
    /// Configuration for a fixed-depth search with no wall-clock pressure.
    ///
    /// Used by tests and analysis: the search runs every iteration up to
    /// `depth` and never aborts on time.
    pub fn fixed_depth(depth: i32) -> Self {
        Self {
            max_depth: depth,
            time_limit: Duration::MAX,
            ..Self::default()
        }
    }
}
