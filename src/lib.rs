//! Dropfour: move selection for a gravity-drop four-in-a-row game.
//!
//! Given a board snapshot, the engine picks the column the automated side
//! should play. It is stateless: every call receives the board, whether the
//! automated side moved first, and the difficulty.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, scoring weights, search depths
//! - [`board`] - Grid representation, gravity, win and draw detection
//! - [`heuristic`] - Position and move evaluation
//! - [`search`] - Easy one-ply selection and minimax for medium/hard
//! - [`protocol`] - Text protocol for host programs
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use dropfour::board::Board;
//! use dropfour::search::{Difficulty, select_move};
//!
//! let board: Board = "_______/_______/_______/_______/_______/___X___".parse().unwrap();
//! let column = select_move(&board, false, Difficulty::Hard);
//! assert!(board.valid_columns().contains(&column));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod heuristic;
pub mod protocol;
pub mod search;
