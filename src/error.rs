//! Error types for cell parsing, encoding and decoding.

use thiserror::Error;

use crate::entities::{Boss, Cell};

/// A row or column outside the 5x5 grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("row {row} is outside the grid (expected 0..=4)")]
    RowOutOfRange { row: u8 },

    #[error("column {col} is outside the grid (expected 0..=4)")]
    ColOutOfRange { col: u8 },
}

/// Text that is not a cell name such as `C3`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellParseError {
    #[error("'{input}' is not a cell (expected a letter A-E followed by a digit 1-5)")]
    BadLength { input: String },

    #[error("'{input}' has no row A-E")]
    BadRow { input: String },

    #[error("'{input}' has no column 1-5")]
    BadCol { input: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BossParseError {
    #[error("unknown boss '{input}'")]
    Unknown { input: String },
}

/// Preconditions of the encoder that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("E Tank count {etanks} is outside 0..=4")]
    ItemCountOutOfRange { etanks: u8 },

    #[error("shifting {cell} by {etanks} leaves the grid")]
    ShiftOutOfGrid { cell: Cell, etanks: u8 },
}

/// Grids that no boss state and E Tank count could have produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("row A must hold exactly one mark, found {found}")]
    ItemMarker { found: usize },

    #[error("neither cell for {boss} is marked")]
    MissingBoss { boss: Boss },

    #[error("both cells for {boss} are marked")]
    AmbiguousBoss { boss: Boss },

    #[error("expected 9 marks, found {count}")]
    UnexpectedMarks { count: usize },

    #[error("{cell} is listed more than once")]
    DuplicateCell { cell: Cell },
}
