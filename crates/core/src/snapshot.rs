//! Snapshot module - plain read-only copies of session state
//!
//! Front ends draw from a `GameSnapshot` instead of borrowing the session.
//! The board is copied without its floor row; the active piece carries its
//! matrix so a renderer needs no piece catalog.

use serde::Serialize;

use crate::pieces::ActivePiece;
use crate::types::{LockEvent, PieceKind, Rotation, MATRIX_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
    pub matrix: [[u8; MATRIX_SIZE]; MATRIX_SIZE],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.anchor.x,
            y: value.anchor.y,
            matrix: *value.matrix.rows(),
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates of the occupied cells with their tags.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.matrix.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &v)| v != 0)
                .map(move |(c, &v)| (self.x + c as i32, self.y + r as i32, v))
        })
    }
}

/// Everything a front end needs to draw one frame. The floor row is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Playable rows, top first.
    pub board: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    /// Anchor row of the landing preview.
    pub ghost_y: Option<i32>,
    pub next: PieceKind,
    pub next_matrix: [[u8; MATRIX_SIZE]; MATRIX_SIZE],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub frame: u64,
    pub piece_id: u32,
    pub episode_id: u32,
    pub last_event: Option<LockEvent>,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board.get(y as usize)?.get(x as usize).copied()
    }
}
