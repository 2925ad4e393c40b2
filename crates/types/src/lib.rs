//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the simulation core, the
//! terminal front end and tests alike.
//!
//! # Cell Tags
//!
//! Board and piece matrices store `u8` tags:
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | 0 | empty |
//! | 1 | sentinel floor |
//! | 2..=8 | piece kind (T, L, J, S, Z, O, I) |
//!
//! Tags only matter for rendering. Game logic only asks "zero or not".
//!
//! # Drop Cadence by Level
//!
//! Gravity is counted in frames (the reference loop ticks at ~60 FPS):
//!
//! | Level | Frames per row |
//! |-------|----------------|
//! | 1 | 60 |
//! | 2 | 45 |
//! | 3 | 30 |
//! | 4 | 20 |
//! | 5 | 15 |
//! | 6 | 10 |
//! | 7 | 5 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_tag(2), Some(piece));
//! assert_eq!(piece.tag(), 2);
//!
//! assert_eq!(Rotation::North.rotate(true), Rotation::East);
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//!
//! assert_eq!(DEFAULT_COLS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

use serde::Serialize;

/// Default playable board width in cells
pub const DEFAULT_COLS: usize = 10;

/// Default playable board height in cells (the sentinel floor row is extra)
pub const DEFAULT_ROWS: usize = 20;

/// Largest accepted board dimension
pub const MAX_BOARD_DIM: usize = 256;

/// Side length of every piece matrix
pub const MATRIX_SIZE: usize = 4;

/// Fixed timestep interval of the reference front end in milliseconds (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Empty cell tag
pub const EMPTY: u8 = 0;

/// Tag of the sentinel floor row
pub const FLOOR_TAG: u8 = 1;

/// Points for one cleared line at level 1; divided by the level at higher levels.
pub const BASE_LINE_REWARD: u32 = 200;

/// First level of a fresh session
pub const START_LEVEL: u32 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 7;

/// Cumulative score needed to leave levels 1..=6, one level per cleared line.
///
/// Levels 5 and 6 share a threshold, so the line after reaching level 5
/// already moves on to level 6.
pub const LEVEL_UP_SCORES: [u32; 6] = [100, 300, 500, 800, 800, 2001];

/// Frames per gravity row, index 0 = level 1
pub const DROP_FRAMES: [u32; 7] = [60, 45, 30, 20, 15, 10, 5];


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and tag:
/// - **T**: tag 2
/// - **L**: tag 3
/// - **J**: tag 4 (mirror of L)
/// - **S**: tag 5
/// - **Z**: tag 6 (mirror of S)
/// - **O**: tag 7, 2x2 square
/// - **I**: tag 8, straight bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in tag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Lowercase name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Cell tag written into matrices and the board for this kind
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
            PieceKind::O => 7,
            PieceKind::I => 8,
        }
    }

    /// Inverse of [`PieceKind::tag`]; `None` for empty, floor and unknown tags
    pub fn from_tag(tag: u8) -> Option<Self> {
        PieceKind::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Offset-table family this kind rotates with
    pub fn family(&self) -> PieceFamily {
        match self {
            PieceKind::O => PieceFamily::O,
            PieceKind::I => PieceFamily::I,
            _ => PieceFamily::Jlstz,
        }
    }
}

/// Rotation families sharing a pivot rule and an offset table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceFamily {
    O,
    I,
    Jlstz,
}

/// Rotation index 0..=3
///
/// - **North**: spawn orientation (index 0)
/// - **East**: 90° clockwise (index 1)
/// - **South**: 180° (index 2)
/// - **West**: 270° clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in 0..=3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any integer, normalized mod 4 into 0..=3
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Next index in the given direction
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate(true), Rotation::North);
    /// assert_eq!(Rotation::North.rotate(false), Rotation::West);
    /// ```
    pub fn rotate(&self, clockwise: bool) -> Self {
        let step = if clockwise { 1 } else { -1 };
        Rotation::from_index(self.index() as i32 + step)
    }
}

/// Player/front-end actions applied to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row, locking it if it cannot fall
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a fresh game (always allowed, also after game over)
    Restart,
}

/// Outcome of a lock, kept by the session for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_gained: u32,
    /// Level after the lock was scored.
    pub level: u32,
}
