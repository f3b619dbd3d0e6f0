//! Board geometry, scoring weights, and search parameters.
//!
//! All the tuning for the move engine lives here. The scoring weights are
//! part of the engine's observable behavior: changing any of them changes
//! which column a given difficulty picks.

// =============================================================================
// Board Geometry
// =============================================================================

/// Rows of the standard board. Row 0 is the top, row `ROWS - 1` the bottom.
pub const ROWS: usize = 6;

/// Columns of the standard board.
pub const COLS: usize = 7;

/// Length of a winning line, and of every window the heuristic scores.
pub const WINDOW: usize = 4;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Base of the per-cell centrality bonus: `SCORE_COLUMN - |column - center|`.
pub const SCORE_COLUMN: i32 = 12;

/// Bonus for a token sitting on a row whose parity favors its side.
pub const SCORE_TEMPO: i32 = 4;

/// Window holding two same-token cells and two empty cells.
pub const SCORE_OPEN_TWO: i32 = 10;

/// Window holding three same-token cells and one empty cell.
pub const SCORE_OPEN_THREE: i32 = 50;

/// Window holding four same-token cells (a win).
pub const SCORE_WIN: i32 = 10_000;

/// Extra reward for a single drop that completes a four. Together with
/// [`SCORE_WIN`] this keeps a finishing drop ahead of every other drop by
/// more than a full win.
pub const SCORE_FINISH: i32 = SCORE_WIN;

// =============================================================================
// Search Parameters
// =============================================================================

/// Minimax depth of the medium tier (one ply for each side).
pub const MEDIUM_DEPTH: u32 = 2;

/// Minimax depth of the hard tier.
pub const HARD_DEPTH: u32 = 5;

/// Chance that the easy tier plays its second-best candidate.
pub const EASY_SECOND_BEST_PROB: f64 = 0.7;
