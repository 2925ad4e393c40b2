//! Session configuration and construction errors.
//!
//! Everything a session needs is passed in here: board size, RNG seed,
//! randomizer and the piece catalog. Nothing is read from globals.

use std::fmt;

use crate::pieces::PieceCatalog;
use crate::rng::Randomizer;
use crate::types::{PieceKind, DEFAULT_COLS, DEFAULT_ROWS, MATRIX_SIZE, MAX_BOARD_DIM};

/// Reasons a board, catalog or session cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Rows or columns is zero.
    ZeroDimension { rows: usize, cols: usize },
    /// Rows or columns exceeds [`MAX_BOARD_DIM`].
    BoardTooLarge { rows: usize, cols: usize },
    /// A piece is wider than the board, so it can never spawn.
    BoardTooNarrow { cols: usize, kind: PieceKind, width: usize },
    /// Board rows passed to `Board::from_rows` have different lengths.
    RaggedRows { row: usize, expected: usize, found: usize },
    /// A piece definition does not fit the fixed matrix.
    ShapeTooLarge { kind: PieceKind, rows: usize, cols: usize },
    /// A piece definition does not have exactly four occupied cells.
    BadCellCount { kind: PieceKind, cells: usize },
    /// Rotating a piece about its pivot leaves the fixed matrix.
    RotationOutOfBounds { kind: PieceKind },
    /// The catalog defines a kind twice.
    DuplicatePiece(PieceKind),
    /// The catalog does not define a kind.
    MissingPiece(PieceKind),
    /// A fixed piece sequence with nothing in it.
    EmptySequence,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension { rows, cols } => {
                write!(f, "board dimensions must be positive (got {rows}x{cols})")
            }
            ConfigError::BoardTooLarge { rows, cols } => write!(
                f,
                "board {rows}x{cols} exceeds the {MAX_BOARD_DIM}x{MAX_BOARD_DIM} limit"
            ),
            ConfigError::BoardTooNarrow { cols, kind, width } => write!(
                f,
                "piece {} is {width} cells wide but the board has {cols} columns",
                kind.as_str()
            ),
            ConfigError::RaggedRows {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            ConfigError::ShapeTooLarge { kind, rows, cols } => write!(
                f,
                "piece {} is {rows}x{cols}, larger than {MATRIX_SIZE}x{MATRIX_SIZE}",
                kind.as_str()
            ),
            ConfigError::BadCellCount { kind, cells } => {
                write!(f, "piece {} has {cells} cells, expected 4", kind.as_str())
            }
            ConfigError::RotationOutOfBounds { kind } => write!(
                f,
                "piece {} leaves its matrix when rotated about its pivot",
                kind.as_str()
            ),
            ConfigError::DuplicatePiece(kind) => {
                write!(f, "piece {} is defined twice", kind.as_str())
            }
            ConfigError::MissingPiece(kind) => {
                write!(f, "piece {} is not defined", kind.as_str())
            }
            ConfigError::EmptySequence => write!(f, "fixed piece sequence is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable session parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: u32,
    pub randomizer: Randomizer,
    pub catalog: PieceCatalog,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: 1,
            randomizer: Randomizer::Uniform,
            catalog: PieceCatalog::standard(),
        }
    }
}

impl SessionConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn with_catalog(mut self, catalog: PieceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Check everything that does not depend on a concrete board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.rows, self.cols)?;
        self.catalog.check_fits(self.cols)?;
        self.randomizer.validate()
    }
}

pub(crate) fn validate_dimensions(rows: usize, cols: usize) -> Result<(), ConfigError> {
    if rows == 0 || cols == 0 {
        return Err(ConfigError::ZeroDimension { rows, cols });
    }
    if rows > MAX_BOARD_DIM || cols > MAX_BOARD_DIM {
        return Err(ConfigError::BoardTooLarge { rows, cols });
    }
    Ok(())
}
