//! Static evaluation of positions and candidate moves.
//!
//! Scores combine three features:
//! - a centrality bonus for every token, larger towards the middle column
//! - a tempo bonus for tokens on rows whose parity favors their side
//! - pattern scores for every 4-cell window holding an open two, an open
//!   three, or a complete four
//!
//! A drop that completes a four earns [`SCORE_FINISH`] on top of its window
//! scores, so it stays ahead of any non-finishing drop by at least
//! [`SCORE_WIN`] even after the opponent's windows are netted out.
//!
//! Tempo parity is measured from the bottom: a token on row `r` sits at depth
//! `height - r - 1`. The side that moved first is rewarded on even depths,
//! the other side on odd depths.

use crate::board::{Board, Token};
use crate::constants::{
    SCORE_COLUMN, SCORE_FINISH, SCORE_OPEN_THREE, SCORE_OPEN_TWO, SCORE_TEMPO, SCORE_WIN,
    WINDOW,
};

/// Centrality bonus for a token in `column`.
pub fn column_bonus(board: &Board, column: usize) -> i32 {
    let center = (board.width() / 2) as i32;
    SCORE_COLUMN - (column as i32 - center).abs()
}

/// Whether a `token` on `row` sits on its side's tempo parity.
pub fn earns_tempo(board: &Board, row: usize, token: Token, automated_moved_first: bool) -> bool {
    let side_moved_first = (token == Token::Enemy) == automated_moved_first;
    let odd_depth = (board.height() - row - 1) % 2 == 1;
    odd_depth != side_moved_first
}

fn tempo_bonus(board: &Board, row: usize, token: Token, automated_moved_first: bool) -> i32 {
    if earns_tempo(board, row, token, automated_moved_first) {
        SCORE_TEMPO
    } else {
        0
    }
}

/// Pattern value of one window for `token`.
pub fn set_value(window: &[Token; WINDOW], token: Token) -> i32 {
    let good = window.iter().filter(|&&t| t == token).count();
    let empty = window.iter().filter(|&&t| t == Token::Empty).count();

    match (good, empty) {
        (4, _) => SCORE_WIN,
        (3, 1) => SCORE_OPEN_THREE,
        (2, 2) => SCORE_OPEN_TWO,
        _ => 0,
    }
}

/// Sum of window values for `token` over the whole board, optionally netting
/// out the opponent's value on the same windows.
fn window_score(board: &Board, token: Token, subtract_opponent: bool) -> i32 {
    let opponent = token.opponent();
    board
        .windows()
        .map(|w| {
            let tokens = board.window_tokens(&w);
            let mut value = set_value(&tokens, token);
            if subtract_opponent {
                value -= set_value(&tokens, opponent);
            }
            value
        })
        .sum()
}

/// Score dropping `token` into `column`, or `None` when the column is full.
///
/// The drop is simulated on a private copy; `board` is never modified.
pub fn score_move(
    board: &Board,
    column: usize,
    token: Token,
    automated_moved_first: bool,
) -> Option<i32> {
    let row = board.landing_row(column)?;
    let mut next = board.clone();
    next.set(row, column, token);

    let finish = if next.completes_four(row, column) {
        SCORE_FINISH
    } else {
        0
    };

    Some(
        column_bonus(board, column)
            + tempo_bonus(board, row, token, automated_moved_first)
            + window_score(&next, token, true)
            + finish,
    )
}

/// Score every `token` on the board plus its window patterns.
pub fn score_board(board: &Board, token: Token, automated_moved_first: bool) -> i32 {
    let mut score = 0;

    for row in 0..board.height() {
        for column in 0..board.width() {
            if board.get(row, column) == token {
                score += column_bonus(board, column);
                score += tempo_bonus(board, row, token, automated_moved_first);
            }
        }
    }

    score + window_score(board, token, false)
}

/// Leaf value of the search tree, from the automated side's point of view.
pub fn leaf_score(board: &Board, automated_moved_first: bool) -> i32 {
    score_board(board, Token::Enemy, automated_moved_first)
        - score_board(board, Token::Player, automated_moved_first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COLS;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    const SCENARIO: &str = "_______/_______/___O___/___XO__/__OOXX_/__XOXX_";

    #[test]
    fn test_set_value_constants() {
        use Token::{Empty as E, Enemy as O, Player as X};
        assert_eq!(set_value(&[O, O, O, O], O), SCORE_WIN);
        assert_eq!(set_value(&[O, E, O, O], O), SCORE_OPEN_THREE);
        assert_eq!(set_value(&[E, O, E, O], O), SCORE_OPEN_TWO);
        assert_eq!(set_value(&[X, O, O, O], O), 0);
        assert_eq!(set_value(&[X, O, O, E], O), 0);
        assert_eq!(set_value(&[E, E, E, O], O), 0);
        assert_eq!(set_value(&[E, E, E, E], O), 0);
    }

    #[test]
    fn test_column_bonus() {
        let b = Board::standard();
        let bonuses: Vec<i32> = (0..COLS).map(|c| column_bonus(&b, c)).collect();
        assert_eq!(bonuses, vec![9, 10, 11, 12, 11, 10, 9]);
    }

    #[test]
    fn test_tempo_polarity() {
        let b = Board::standard();
        // Bottom row has depth 0 (even).
        assert!(earns_tempo(&b, 5, Token::Enemy, true));
        assert!(!earns_tempo(&b, 4, Token::Enemy, true));
        assert!(!earns_tempo(&b, 5, Token::Enemy, false));
        assert!(earns_tempo(&b, 4, Token::Enemy, false));
        // The player's polarity is the mirror image.
        assert!(!earns_tempo(&b, 5, Token::Player, true));
        assert!(earns_tempo(&b, 5, Token::Player, false));
    }

    #[test]
    fn test_score_move_empty_board() {
        let b = Board::standard();
        let first: Vec<i32> = (0..COLS)
            .map(|c| score_move(&b, c, Token::Enemy, true).unwrap())
            .collect();
        assert_eq!(first, vec![13, 14, 15, 16, 15, 14, 13]);
        let second: Vec<i32> = (0..COLS)
            .map(|c| score_move(&b, c, Token::Enemy, false).unwrap())
            .collect();
        assert_eq!(second, vec![9, 10, 11, 12, 11, 10, 9]);
    }

    #[test]
    fn test_score_move_centrality_monotone() {
        let b = Board::standard();
        let center = COLS / 2;
        for flag in [true, false] {
            for offset in 0..center {
                let inner = score_move(&b, center + offset, Token::Enemy, flag).unwrap();
                let outer = score_move(&b, center + offset + 1, Token::Enemy, flag).unwrap();
                assert!(inner > outer);
                let inner = score_move(&b, center - offset, Token::Enemy, flag).unwrap();
                let outer = score_move(&b, center - offset - 1, Token::Enemy, flag).unwrap();
                assert!(inner > outer);
            }
        }
    }

    #[test]
    fn test_score_move_scenario() {
        let b = board(SCENARIO);
        let scores: Vec<i32> = (0..COLS)
            .map(|c| score_move(&b, c, Token::Enemy, true).unwrap())
            .collect();
        assert_eq!(scores, vec![-7, -16, 35, -14, 21, -6, -17]);
        let scores: Vec<i32> = (0..COLS)
            .map(|c| score_move(&b, c, Token::Enemy, false).unwrap())
            .collect();
        assert_eq!(scores, vec![-11, -20, 31, -18, 25, -10, -21]);
    }

    #[test]
    fn test_score_move_full_column() {
        let b = board("O__/X__/O__/X__");
        assert_eq!(score_move(&b, 0, Token::Enemy, true), None);
        assert!(score_move(&b, 1, Token::Enemy, true).is_some());
    }

    #[test]
    fn test_score_move_leaves_board_untouched() {
        let b = board(SCENARIO);
        let before = b.clone();
        for c in 0..COLS {
            score_move(&b, c, Token::Enemy, true);
            score_move(&b, c, Token::Player, false);
        }
        assert_eq!(b, before);
    }

    #[test]
    fn test_win_dominates() {
        let b = board("_______/_______/_______/_______/_______/OOO_XXX");
        let win = score_move(&b, 3, Token::Enemy, true).unwrap();
        let edge = score_move(&b, 6, Token::Enemy, true).unwrap();
        assert_eq!(win, 20_016);
        assert!(win - edge >= SCORE_WIN);
        for c in [0, 1, 2, 4, 5, 6] {
            assert!(win > score_move(&b, c, Token::Enemy, true).unwrap());
        }
    }

    #[test]
    fn test_win_outscores_strong_build() {
        // Column 4 builds several threes; column 0 finishes a diagonal.
        let b = board("__X____/__XO___/__OO__O/_XOXX_X/_OOOXOO/XOXOXXX");
        let win = score_move(&b, 0, Token::Enemy, true).unwrap();
        let build = score_move(&b, 4, Token::Enemy, true).unwrap();
        assert_eq!(win, 20_019);
        assert_eq!(build, 291);
        assert!(win - build >= SCORE_WIN);

        let win = score_move(&b, 0, Token::Enemy, false).unwrap();
        let build = score_move(&b, 4, Token::Enemy, false).unwrap();
        assert_eq!((win, build), (20_023, 295));
    }

    #[test]
    fn test_score_board_scenario() {
        let b = board(SCENARIO);
        assert_eq!(score_board(&b, Token::Enemy, true), 106);
        assert_eq!(score_board(&b, Token::Player, true), 143);
        assert_eq!(leaf_score(&b, true), -37);
        assert_eq!(leaf_score(&b, false), -41);
    }

    #[test]
    fn test_leaf_symmetry() {
        let empty = Board::standard();
        assert_eq!(leaf_score(&empty, true), 0);
        assert_eq!(leaf_score(&empty, false), 0);

        // Mirror-image stacks cancel out as well.
        let stacked = board("_______/_______/_______/_______/___X___/___O___");
        assert_eq!(score_board(&stacked, Token::Enemy, true), 16);
        assert_eq!(leaf_score(&stacked, true), 0);
        assert_eq!(leaf_score(&stacked, false), 0);
    }
}
