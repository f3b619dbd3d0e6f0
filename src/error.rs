//! Error types for board construction, token drops, and settings.

/// Errors raised while parsing a board or dropping a token into it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no cells")]
    Empty,

    #[error("unknown cell '{found}' at row {row}, column {column}")]
    Parse {
        row: usize,
        column: usize,
        found: char,
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column {column} is out of range (width {width})")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// A difficulty name that is neither a tier name nor a numeric level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or 0-2)")]
pub struct UnknownDifficulty(pub String);
