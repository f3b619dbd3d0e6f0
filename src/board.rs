//! Grid representation for the gravity-drop game.
//!
//! A [`Board`] is a `height × width` grid of [`Token`]s. Row 0 is the top and
//! row `height - 1` the bottom; tokens settle at the bottom of their column, so
//! within a column every occupied cell sits below every empty one. Boards
//! handed to the engine are assumed to respect that invariant.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::constants::{COLS, ROWS, WINDOW};
use crate::error::BoardError;

/// Content of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// The human side.
    Player,
    /// The automated side.
    Enemy,
    Empty,
}

impl Token {
    /// The other side. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Token {
        match self {
            Token::Player => Token::Enemy,
            Token::Enemy => Token::Player,
            Token::Empty => Token::Empty,
        }
    }

    /// Character used by the text notation.
    pub fn symbol(self) -> char {
        match self {
            Token::Player => 'X',
            Token::Enemy => 'O',
            Token::Empty => '_',
        }
    }

    fn from_symbol(ch: char) -> Option<Token> {
        match ch {
            'X' | 'x' => Some(Token::Player),
            'O' | 'o' => Some(Token::Enemy),
            '_' | '.' => Some(Token::Empty),
            _ => None,
        }
    }
}

/// A `(row, column)` coordinate.
pub type Cell = (usize, usize);

/// Orientation of a window, in scan order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right.
    DiagonalDown,
    /// Bottom-left to top-right.
    DiagonalUp,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDown,
        Direction::DiagonalUp,
    ];

    /// Row and column step between consecutive cells.
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }

    /// Rows a window in this direction can start on.
    fn start_rows(self, height: usize) -> Range<usize> {
        match self {
            Direction::Horizontal => 0..height,
            Direction::Vertical | Direction::DiagonalDown => 0..(height + 1).saturating_sub(WINDOW),
            Direction::DiagonalUp => (WINDOW - 1)..height.max(WINDOW - 1),
        }
    }

    /// Columns a window in this direction can start on.
    fn start_columns(self, width: usize) -> Range<usize> {
        match self {
            Direction::Vertical => 0..width,
            _ => 0..(width + 1).saturating_sub(WINDOW),
        }
    }
}

/// A line of [`WINDOW`] consecutive cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: Cell,
    pub direction: Direction,
}

impl Window {
    pub fn cells(&self) -> [Cell; WINDOW] {
        let (dr, dc) = self.direction.delta();
        let (row, column) = self.start;
        std::array::from_fn(|k| {
            let k = k as isize;
            (row.wrapping_add_signed(dr * k), column.wrapping_add_signed(dc * k))
        })
    }
}

/// Result of [`Board::is_terminal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoWinner,
    Winner(Token),
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Token>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Create an empty board with the given number of rows and columns.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Token::Empty; height * width],
        }
    }

    /// Create an empty 6 × 7 board.
    pub fn standard() -> Self {
        Self::new(ROWS, COLS)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn idx(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.height && column < self.width,
            "cell ({row}, {column}) is outside a {}x{} board",
            self.height,
            self.width
        );
        row * self.width + column
    }

    pub fn get(&self, row: usize, column: usize) -> Token {
        self.cells[self.idx(row, column)]
    }

    /// Overwrite a cell without applying gravity.
    pub fn set(&mut self, row: usize, column: usize, token: Token) {
        let i = self.idx(row, column);
        self.cells[i] = token;
    }

    /// Columns whose top cell is empty, in ascending order.
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&column| self.get(0, column) == Token::Empty)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        (0..self.width).all(|column| self.get(0, column) != Token::Empty)
    }

    /// Row a token dropped into `column` would land on, or `None` if the
    /// column is full.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not in `0..width`.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if self.get(0, column) != Token::Empty {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.get(row, column) == Token::Empty)
    }

    /// Copy of this board with `token` dropped into `column`, or `None` if
    /// the column is full.
    pub fn with_token(&self, column: usize, token: Token) -> Option<Board> {
        let row = self.landing_row(column)?;
        let mut next = self.clone();
        next.set(row, column, token);
        Some(next)
    }

    /// Drop `token` into `column` and return the row it landed on.
    pub fn drop_token(&mut self, column: usize, token: Token) -> Result<usize, BoardError> {
        if column >= self.width {
            return Err(BoardError::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        let row = self
            .landing_row(column)
            .ok_or(BoardError::ColumnFull { column })?;
        self.set(row, column, token);
        Ok(row)
    }

    /// Every window on the board: horizontal, then vertical, then
    /// diagonal-down, then diagonal-up, each scanned row-major.
    pub fn windows(&self) -> impl Iterator<Item = Window> + use<> {
        let (height, width) = (self.height, self.width);
        Direction::ALL.into_iter().flat_map(move |direction| {
            direction.start_rows(height).flat_map(move |row| {
                direction.start_columns(width).map(move |column| Window {
                    start: (row, column),
                    direction,
                })
            })
        })
    }

    /// Tokens under a window, in cell order.
    pub fn window_tokens(&self, window: &Window) -> [Token; WINDOW] {
        window.cells().map(|(row, column)| self.get(row, column))
    }

    fn is_winning(&self, window: &Window) -> Option<Token> {
        let tokens = self.window_tokens(window);
        let first = tokens[0];
        (first != Token::Empty && tokens.iter().all(|&t| t == first)).then_some(first)
    }

    /// Whether the token at `(row, column)` is part of a four-in-a-row.
    pub fn completes_four(&self, row: usize, column: usize) -> bool {
        let token = self.get(row, column);
        token != Token::Empty
            && self
                .windows()
                .filter(|w| w.cells().contains(&(row, column)))
                .any(|w| self.is_winning(&w) == Some(token))
    }

    /// Cells of the first four-in-a-row found, in scan order.
    pub fn winning_line(&self) -> Option<[Cell; WINDOW]> {
        self.windows()
            .find(|w| self.is_winning(w).is_some())
            .map(|w| w.cells())
    }

    /// Classify the position: a four-in-a-row wins, a full board without
    /// one is a draw.
    pub fn is_terminal(&self) -> Outcome {
        if let Some(token) = self.windows().find_map(|w| self.is_winning(&w)) {
            return Outcome::Winner(token);
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::NoWinner
        }
    }
}

/// Parse the text notation: rows top to bottom separated by `/` or newlines,
/// `X` for the player, `O` for the enemy, `_` or `.` for empty. Whitespace
/// inside a row is ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<Token>> = Vec::new();
        for line in s.split(['/', '\n']) {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            let row = rows.len();
            let tokens = symbols
                .iter()
                .enumerate()
                .map(|(column, &found)| {
                    Token::from_symbol(found).ok_or(BoardError::Parse { row, column, found })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(first) = rows.first() {
                if first.len() != tokens.len() {
                    return Err(BoardError::Ragged {
                        row,
                        expected: first.len(),
                        found: tokens.len(),
                    });
                }
            }
            rows.push(tokens);
        }

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        Ok(Board {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl Board {
    fn write_column_labels(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for column in 0..self.width {
            write!(f, " {column}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_column_labels(f)?;
        for row in 0..self.height {
            write!(f, "{row:>2}")?;
            for column in 0..self.width {
                write!(f, " {}", self.get(row, column).symbol())?;
            }
            writeln!(f)?;
        }
        self.write_column_labels(f)
    }
}
