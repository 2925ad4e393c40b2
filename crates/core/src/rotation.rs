//! Rotation engine - matrix rotation about a fixed pivot plus kick resolution.
//!
//! Cells are rotated with the 2x2 matrices `[[0, 1], [-1, 0]]` (clockwise)
//! and `[[0, -1], [1, 0]]` (counter-clockwise), applied in a y-up frame
//! centred on the pivot. The board is y-down, so vectors are flipped on the
//! way in and out.
//!
//! A rotation request is resolved in at most two attempts:
//!
//! 1. turn in the requested direction, apply the family kick, clamp off the
//!    left wall, test for collision;
//! 2. otherwise turn that attempt back the other way, undoing its kick, and
//!    clamp again. This restores the starting orientation; the only thing a
//!    blocked request can keep is the rightward nudge off the left wall.
//!
//! If the undone placement is the starting one, or is itself illegal, the
//! request is rejected and the caller's piece is left exactly as it was.

use std::fmt;

use crate::board::{Anchor, Board};
use crate::pieces::{ActivePiece, PieceDef, PieceMatrix, Pivot};
use crate::types::MATRIX_SIZE;

/// A rotated cell would land outside the fixed matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixBoundsError {
    pub row: i32,
    pub col: i32,
}

impl fmt::Display for MatrixBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotated cell ({}, {}) is outside the {MATRIX_SIZE}x{MATRIX_SIZE} matrix",
            self.row, self.col
        )
    }
}

impl std::error::Error for MatrixBoundsError {}

/// Rotate every occupied cell of `matrix` about `pivot`.
///
/// Tags travel with their cells. Fails instead of truncating when a cell
/// would leave the matrix.
pub fn rotate_matrix(
    matrix: &PieceMatrix,
    pivot: Pivot,
    clockwise: bool,
) -> Result<PieceMatrix, MatrixBoundsError> {
    let limit = 2 * (MATRIX_SIZE as i32 - 1);
    let mut out = PieceMatrix::default();

    for (r, c) in matrix.cells() {
        // Half-cell vector from the pivot, y pointing up.
        let vx = 2 * c as i32 - pivot.x2;
        let vy = pivot.y2 - 2 * r as i32;

        let (nx, ny) = if clockwise { (vy, -vx) } else { (-vy, vx) };

        let col2 = pivot.x2 + nx;
        let row2 = pivot.y2 - ny;
        if col2 < 0 || row2 < 0 || col2 > limit || row2 > limit || col2 % 2 != 0 || row2 % 2 != 0 {
            return Err(MatrixBoundsError {
                row: row2.div_euclid(2),
                col: col2.div_euclid(2),
            });
        }

        let tag = matrix.get(r, c).unwrap_or_default();
        out.set((row2 / 2) as usize, (col2 / 2) as usize, tag);
    }

    Ok(out)
}

/// Shift `anchor` right just enough that no occupied cell has a negative column.
pub fn clamp_left(matrix: &PieceMatrix, anchor: Anchor) -> Anchor {
    match matrix.bounds() {
        Some(b) => {
            let left = anchor.x + b.min_col as i32;
            if left < 0 {
                Anchor::new(anchor.x - left, anchor.y)
            } else {
                anchor
            }
        }
        None => anchor,
    }
}

/// Naive rotation of `piece` with an optional family kick and the left clamp.
fn candidate(
    piece: &ActivePiece,
    def: &PieceDef,
    clockwise: bool,
    with_kick: bool,
) -> Result<ActivePiece, MatrixBoundsError> {
    let matrix = rotate_matrix(&piece.matrix, def.pivot, clockwise)?;
    let rotation = piece.rotation.rotate(clockwise);

    let mut anchor = piece.anchor;
    if with_kick {
        let (dx, dy) = def.kick(piece.rotation, rotation);
        anchor = Anchor::new(anchor.x + dx, anchor.y + dy);
    }
    let anchor = clamp_left(&matrix, anchor);

    Ok(ActivePiece {
        kind: piece.kind,
        matrix,
        anchor,
        rotation,
    })
}

/// Resolve a rotation request against `board`.
///
/// Returns the legal placement to commit, or `Ok(None)` when the request is
/// rejected. A returned placement is either turned in the requested direction
/// or keeps `piece.rotation`; it is never turned the other way. `piece` is
/// never modified.
pub fn resolve_rotation(
    board: &Board,
    piece: &ActivePiece,
    def: &PieceDef,
    clockwise: bool,
) -> Result<Option<ActivePiece>, MatrixBoundsError> {
    let primary = candidate(piece, def, clockwise, true)?;
    if !board.collides(&primary.matrix, primary.anchor) {
        return Ok(Some(primary));
    }

    let undone = candidate(&primary, def, !clockwise, true)?;
    if undone == *piece || board.collides(&undone.matrix, undone.anchor) {
        return Ok(None);
    }
    Ok(Some(undone))
}
