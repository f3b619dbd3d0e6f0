//! Move selection for the automated side.
//!
//! Three tiers are available:
//! - [`Difficulty::Easy`] ranks every legal drop with [`score_move`] and, most of
//!   the time, deliberately plays the runner-up.
//! - [`Difficulty::Medium`] and [`Difficulty::Hard`] run a fixed-depth minimax
//!   with [`leaf_score`] at the leaves.
//!
//! The search does not stop on positions that are already won. A four-in-a-row
//! is only noticed through its [`SCORE_WIN`](crate::constants::SCORE_WIN)
//! weight once the leaf is reached, so a line the opponent can answer with its
//! own four is valued as roughly even.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::board::{Board, Token};
use crate::constants::{EASY_SECOND_BEST_PROB, HARD_DEPTH, MEDIUM_DEPTH};
use crate::error::UnknownDifficulty;
use crate::heuristic::{leaf_score, score_move};

/// Token played by the engine.
pub const AUTOMATED: Token = Token::Enemy;

/// Token played by the human side.
pub const HUMAN: Token = Token::Player;

/// Strength of the automated opponent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Minimax depth, or `None` for the one-ply easy tier.
    pub fn depth(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(MEDIUM_DEPTH),
            Difficulty::Hard => Some(HARD_DEPTH),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.pad(name)
    }
}

/// Accepts the tier names as well as the numeric levels `0`, `1` and `2`.
impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "0" => Ok(Difficulty::Easy),
            "medium" | "1" => Ok(Difficulty::Medium),
            "hard" | "2" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// A candidate column with its one-ply score.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoredColumn {
    pub column: usize,
    pub score: i32,
}

/// Value of a search node and the column that achieves it. Leaves carry no
/// column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub column: Option<usize>,
}

/// Score every valid column for `token`, best first. Equal scores keep
/// ascending column order.
pub fn rank_moves(board: &Board, token: Token, automated_moved_first: bool) -> Vec<ScoredColumn> {
    let mut ranked: Vec<ScoredColumn> = board
        .valid_columns()
        .into_iter()
        .filter_map(|column| {
            score_move(board, column, token, automated_moved_first)
                .map(|score| ScoredColumn { column, score })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Easy-tier choice over a ranking produced by [`rank_moves`].
///
/// Plays the runner-up with probability [`EASY_SECOND_BEST_PROB`] when it
/// exists and scores above zero, the best candidate otherwise.
pub fn pick_easy(ranked: &[ScoredColumn], rng: &mut fastrand::Rng) -> Option<usize> {
    match ranked {
        [_, second, ..] if second.score > 0 && rng.f64() < EASY_SECOND_BEST_PROB => {
            Some(second.column)
        }
        [best, ..] => Some(best.column),
        [] => None,
    }
}

/// Fixed-depth minimax. The maximizing side drops [`AUTOMATED`] tokens, the
/// minimizing side [`HUMAN`] tokens. Ties keep the lowest column.
///
/// A board with no valid column is evaluated as a leaf, whatever the
/// remaining depth.
pub fn minimax(
    board: &Board,
    depth: u32,
    maximizing: bool,
    automated_moved_first: bool,
) -> SearchResult {
    let columns = board.valid_columns();
    if depth == 0 || columns.is_empty() {
        return SearchResult {
            score: leaf_score(board, automated_moved_first),
            column: None,
        };
    }

    let (token, initial) = if maximizing {
        (AUTOMATED, i32::MIN)
    } else {
        (HUMAN, i32::MAX)
    };
    let mut best = SearchResult {
        score: initial,
        column: None,
    };

    for column in columns {
        let Some(child) = board.with_token(column, token) else {
            continue;
        };
        let score = minimax(&child, depth - 1, !maximizing, automated_moved_first).score;
        let improves = if maximizing {
            score > best.score
        } else {
            score < best.score
        };
        if improves {
            best = SearchResult {
                score,
                column: Some(column),
            };
        }
    }

    best
}

/// Choose the column the automated side should play.
///
/// # Panics
///
/// Panics if `board` has no valid column. Callers check for a finished game
/// before asking for a move.
pub fn select_move(board: &Board, automated_moved_first: bool, difficulty: Difficulty) -> usize {
    select_move_with_rng(
        board,
        automated_moved_first,
        difficulty,
        &mut fastrand::Rng::new(),
    )
}

/// [`select_move`] with an explicit random source for the easy tier.
pub fn select_move_with_rng(
    board: &Board,
    automated_moved_first: bool,
    difficulty: Difficulty,
    rng: &mut fastrand::Rng,
) -> usize {
    let choice = match difficulty.depth() {
        None => {
            let ranked = rank_moves(board, AUTOMATED, automated_moved_first);
            trace!("ranked columns: {ranked:?}");
            pick_easy(&ranked, rng)
        }
        Some(depth) => {
            let result = minimax(board, depth, true, automated_moved_first);
            trace!("minimax depth {depth}: {result:?}");
            result.column
        }
    };

    let column = choice.unwrap_or_else(|| panic!("no valid column to play on:\n{board}"));
    debug!("{difficulty} tier chose column {column}");
    column
}
