//! Board module - manages the game grid
//!
//! The board is `rows x cols` playable cells plus one sentinel floor row
//! stored directly below them. The floor is always filled, so "can this piece
//! move down" is an ordinary collision test.
//! Uses flat row-major storage. Coordinates: (x, y) where x ranges
//! `0..cols` (left to right) and y ranges `0..=rows` (top to floor).

use serde::Serialize;

use crate::config::{validate_dimensions, ConfigError};
use crate::pieces::PieceMatrix;
use crate::types::{EMPTY, FLOOR_TAG};

/// Board position of a piece matrix's origin cell. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The game board with its floor row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (y * cols + x), floor row last
    cells: Vec<u8>,
}

impl Board {
    /// Create an empty board with a filled floor row
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        validate_dimensions(rows, cols)?;
        let mut cells = vec![EMPTY; (rows + 1) * cols];
        cells[rows * cols..].fill(FLOOR_TAG);
        Ok(Self { rows, cols, cells })
    }

    /// Build a board from playable rows, top first. The floor is appended.
    ///
    /// Non-zero values are kept as-is (they are only rendering tags).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ConfigError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut board = Self::new(rows.len(), cols)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ConfigError::RaggedRows {
                    row: y,
                    expected: cols,
                    found: row.len(),
                });
            }
            board.cells[y * cols..(y + 1) * cols].copy_from_slice(row);
        }
        Ok(board)
    }

    /// Flat index from (x, y); the floor row is addressable.
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize > self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    /// Number of playable rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Physical height including the floor row
    pub fn height(&self) -> usize {
        self.rows + 1
    }

    /// Get cell at position (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a playable cell; the floor row cannot be written.
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, tag: u8) -> bool {
        if y >= self.rows as i32 {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = tag;
                true
            }
            None => false,
        }
    }

    /// Check if position is a free playable cell
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        y < self.rows as i32 && self.get(x, y) == Some(EMPTY)
    }

    /// Would `matrix` placed at `anchor` overlap the walls, the area above
    /// the board, the floor, or a filled cell?
    pub fn collides(&self, matrix: &PieceMatrix, anchor: Anchor) -> bool {
        matrix
            .cells()
            .iter()
            .any(|&(r, c)| !self.is_free(anchor.x + c as i32, anchor.y + r as i32))
    }

    /// Rows the piece can still fall before it rests (0 if it already collides).
    pub fn drop_distance(&self, matrix: &PieceMatrix, anchor: Anchor) -> i32 {
        if self.collides(matrix, anchor) {
            return 0;
        }
        let mut distance = 0;
        while !self.collides(matrix, Anchor::new(anchor.x, anchor.y + distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Row slice, floor row included at index `rows()`
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y > self.rows {
            return None;
        }
        Some(&self.cells[y * self.cols..(y + 1) * self.cols])
    }

    /// Playable rows, top to bottom
    pub fn playable_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells[..self.rows * self.cols].chunks(self.cols)
    }

    /// Check if a playable row is completely filled (the floor never counts)
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows {
            return false;
        }
        let start = y * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Remove every full playable row and return how many were removed.
    ///
    /// Single bottom-to-top pass with a write cursor: surviving rows are
    /// copied down in order, the vacated rows at the top are emptied. The
    /// floor row is never touched and the height never changes.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.cols;
        let mut write_y = self.rows;
        let mut cleared = 0;

        for read_y in (0..self.rows).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }

    /// Merge a piece into the board.
    /// Returns false, leaving the board untouched, if any cell collides
    pub fn lock_piece(&mut self, matrix: &PieceMatrix, anchor: Anchor) -> bool {
        if self.collides(matrix, anchor) {
            return false;
        }

        for (r, c) in matrix.cells() {
            let tag = matrix.get(r, c).unwrap_or(FLOOR_TAG);
            self.set(anchor.x + c as i32, anchor.y + r as i32, tag);
        }
        true
    }

    /// Count of filled playable cells
    pub fn filled_cells(&self) -> usize {
        self.cells[..self.rows * self.cols]
            .iter()
            .filter(|&&c| c != EMPTY)
            .count()
    }

    /// Reference to all cells, floor row last
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Empty the playable area; the floor stays
    pub fn clear(&mut self) {
        self.cells[..self.rows * self.cols].fill(EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceCatalog;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(20, 10).unwrap();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 20), Some(209));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 21), None);
    }

    #[test]
    fn test_floor_row_is_filled_and_read_only() {
        let mut board = Board::new(4, 3).unwrap();
        assert_eq!(board.row(4), Some(&[FLOOR_TAG; 3][..]));
        assert!(!board.set(0, 4, EMPTY));
        assert!(!board.is_row_full(4));
        assert_eq!(board.height(), 5);
    }

    #[test]
    fn test_negative_column_never_wraps() {
        let mut board = Board::new(4, 4).unwrap();
        // Leave column 0 empty and fill the rightmost column: a cell at x = -1
        // must not read the previous row's last cell.
        for y in 0..4 {
            board.set(3, y, 9);
        }
        let t = PieceCatalog::standard().def(PieceKind::T).matrix;
        assert!(board.collides(&t, Anchor::new(-1, 1)));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Board::from_rows(&[vec![0u8, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_lock_piece_is_all_or_nothing() {
        let mut board = Board::new(20, 10).unwrap();
        let o = PieceCatalog::standard().def(PieceKind::O).matrix;
        board.set(5, 19, 9);
        let before = board.clone();
        assert!(!board.lock_piece(&o, Anchor::new(3, 18)));
        assert_eq!(board, before);

        assert!(board.lock_piece(&o, Anchor::new(0, 18)));
        assert_eq!(board.get(1, 18), Some(PieceKind::O.tag()));
        assert_eq!(board.filled_cells(), 5);
    }
}
