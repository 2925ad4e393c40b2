//! Pieces module - tetromino matrices, pivots and offset tables
//!
//! Every piece is stored as a fixed 4x4 matrix of cell tags from the moment
//! the catalog is built. Definitions may be given smaller (the classic shapes
//! are two rows tall); they are normalized into the top-left corner.
//!
//! Pivots are kept in half-cell units so the I piece can turn about the
//! centre of its box while the other pieces turn about cell (1, 1).

use arrayvec::ArrayVec;

use crate::board::Anchor;
use crate::config::ConfigError;
use crate::rotation::rotate_matrix;
use crate::types::{PieceFamily, PieceKind, Rotation, EMPTY, MATRIX_SIZE};

/// Occupied cell of a matrix as `(row, col)`.
pub type MatrixCell = (usize, usize);

/// Occupied cells of one matrix (at most every cell of the 4x4).
pub type MatrixCells = ArrayVec<MatrixCell, { MATRIX_SIZE * MATRIX_SIZE }>;

/// Fixed-size piece matrix, row-major, `0` = empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceMatrix([[u8; MATRIX_SIZE]; MATRIX_SIZE]);

/// Inclusive bounding box of the occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl CellBounds {
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }
}

impl PieceMatrix {
    pub const fn new(rows: [[u8; MATRIX_SIZE]; MATRIX_SIZE]) -> Self {
        Self(rows)
    }

    /// Normalize a smaller definition into the top-left of a 4x4 matrix.
    ///
    /// Non-zero input values are replaced by `kind`'s tag.
    pub fn from_rows<R: AsRef<[u8]>>(kind: PieceKind, rows: &[R]) -> Result<Self, ConfigError> {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        if rows.len() > MATRIX_SIZE || width > MATRIX_SIZE {
            return Err(ConfigError::ShapeTooLarge {
                kind,
                rows: rows.len(),
                cols: width,
            });
        }

        let mut out = [[EMPTY; MATRIX_SIZE]; MATRIX_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.as_ref().iter().enumerate() {
                if v != EMPTY {
                    out[r][c] = kind.tag();
                }
            }
        }
        Ok(Self(out))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Raw rows, for rendering.
    pub fn rows(&self) -> &[[u8; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.0
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, tag: u8) {
        self.0[row][col] = tag;
    }

    /// Occupied cells in row-major order. Does not allocate.
    pub fn cells(&self) -> MatrixCells {
        let mut out = MatrixCells::new();
        for (r, row) in self.0.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v != EMPTY {
                    out.push((r, c));
                }
            }
        }
        out
    }

    pub fn cell_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v != EMPTY).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Bounding box of the occupied cells, `None` for an empty matrix.
    pub fn bounds(&self) -> Option<CellBounds> {
        let cells = self.cells();
        let (first_r, first_c) = *cells.first()?;
        let mut b = CellBounds {
            min_row: first_r,
            max_row: first_r,
            min_col: first_c,
            max_col: first_c,
        };
        for &(r, c) in &cells {
            b.min_row = b.min_row.min(r);
            b.max_row = b.max_row.max(r);
            b.min_col = b.min_col.min(c);
            b.max_col = b.max_col.max(c);
        }
        Some(b)
    }
}

/// Rotation centre in half-cell units (`x2 = 2 * col`, `y2 = 2 * row`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pivot {
    pub x2: i32,
    pub y2: i32,
}

impl Pivot {
    /// Centre of the 4x4 box, between cells (1, 1) and (2, 2).
    pub const BOX_CENTER: Pivot = Pivot { x2: 3, y2: 3 };

    /// Pivot on the centre of a cell.
    pub const fn cell(row: i32, col: i32) -> Self {
        Self {
            x2: col * 2,
            y2: row * 2,
        }
    }
}

/// Kick vectors `(dx, dy)` indexed by rotation index, board coordinates (y down).
pub type OffsetTable = [(i32, i32); 4];

/// Cancels the drift of turning the 2x2 square about a corner cell.
pub const O_OFFSETS: OffsetTable = [(0, 0), (0, 1), (-1, 1), (-1, 0)];

/// Box-centre rotation of the bar needs no correction.
pub const I_OFFSETS: OffsetTable = [(0, 0), (0, 0), (0, 0), (0, 0)];

/// Cell-pivot rotation of the three-wide pieces needs no correction.
pub const JLSTZ_OFFSETS: OffsetTable = [(0, 0), (0, 0), (0, 0), (0, 0)];

pub fn family_offsets(family: PieceFamily) -> &'static OffsetTable {
    match family {
        PieceFamily::O => &O_OFFSETS,
        PieceFamily::I => &I_OFFSETS,
        PieceFamily::Jlstz => &JLSTZ_OFFSETS,
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    /// Spawn orientation (rotation index 0).
    pub matrix: PieceMatrix,
    pub pivot: Pivot,
    pub offsets: OffsetTable,
}

impl PieceDef {
    /// Build a definition using the kind's standard pivot and offset table.
    pub fn from_rows<R: AsRef<[u8]>>(kind: PieceKind, rows: &[R]) -> Result<Self, ConfigError> {
        Ok(Self {
            kind,
            matrix: PieceMatrix::from_rows(kind, rows)?,
            pivot: standard_pivot(kind),
            offsets: *family_offsets(kind.family()),
        })
    }

    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_offsets(mut self, offsets: OffsetTable) -> Self {
        self.offsets = offsets;
        self
    }

    /// Kick applied when turning from `from` to `to`.
    pub fn kick(&self, from: Rotation, to: Rotation) -> (i32, i32) {
        let (ox, oy) = self.offsets[from.index()];
        let (nx, ny) = self.offsets[to.index()];
        (ox - nx, oy - ny)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let cells = self.matrix.cell_count();
        if cells != 4 {
            return Err(ConfigError::BadCellCount {
                kind: self.kind,
                cells,
            });
        }

        // Every orientation, both directions, must stay inside the matrix.
        for clockwise in [true, false] {
            let mut m = self.matrix;
            for _ in 0..4 {
                m = rotate_matrix(&m, self.pivot, clockwise)
                    .map_err(|_| ConfigError::RotationOutOfBounds { kind: self.kind })?;
            }
        }
        Ok(())
    }
}

fn standard_pivot(kind: PieceKind) -> Pivot {
    match kind.family() {
        PieceFamily::I => Pivot::BOX_CENTER,
        PieceFamily::O | PieceFamily::Jlstz => Pivot::cell(1, 1),
    }
}

const fn shape(rows: [[u8; MATRIX_SIZE]; 2]) -> PieceMatrix {
    PieceMatrix::new([rows[0], rows[1], [0; MATRIX_SIZE], [0; MATRIX_SIZE]])
}

const T: u8 = 2;
const L: u8 = 3;
const J: u8 = 4;
const S: u8 = 5;
const Z: u8 = 6;
const O: u8 = 7;
const I: u8 = 8;

/// The classic shapes, two rows tall, pivot cell at (1, 1).
const STANDARD_DEFS: [PieceDef; 7] = [
    PieceDef {
        kind: PieceKind::T,
        matrix: shape([[0, T, 0, 0], [T, T, T, 0]]),
        pivot: Pivot::cell(1, 1),
        offsets: JLSTZ_OFFSETS,
    },
    PieceDef {
        kind: PieceKind::L,
        matrix: shape([[0, 0, L, 0], [L, L, L, 0]]),
        pivot: Pivot::cell(1, 1),
        offsets: JLSTZ_OFFSETS,
    },
    PieceDef {
        kind: PieceKind::J,
        matrix: shape([[J, 0, 0, 0], [J, J, J, 0]]),
        pivot: Pivot::cell(1, 1),
        offsets: JLSTZ_OFFSETS,
    },
    PieceDef {
        kind: PieceKind::S,
        matrix: shape([[0, S, S, 0], [S, S, 0, 0]]),
        pivot: Pivot::cell(1, 1),
        offsets: JLSTZ_OFFSETS,
    },
    PieceDef {
        kind: PieceKind::Z,
        matrix: shape([[Z, Z, 0, 0], [0, Z, Z, 0]]),
        pivot: Pivot::cell(1, 1),
        offsets: JLSTZ_OFFSETS,
    },
    PieceDef {
        kind: PieceKind::O,
        matrix: shape([[0, O, O, 0], [0, O, O, 0]]),
        pivot: Pivot::cell(1, 1),
        offsets: O_OFFSETS,
    },
    PieceDef {
        kind: PieceKind::I,
        matrix: shape([[0, 0, 0, 0], [I, I, I, I]]),
        pivot: Pivot::BOX_CENTER,
        offsets: I_OFFSETS,
    },
];

/// Immutable set of the seven piece definitions, indexed by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    defs: [PieceDef; 7],
}

fn slot(kind: PieceKind) -> usize {
    match kind {
        PieceKind::T => 0,
        PieceKind::L => 1,
        PieceKind::J => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::O => 5,
        PieceKind::I => 6,
    }
}

impl PieceCatalog {
    /// The standard seven tetrominoes.
    pub fn standard() -> Self {
        Self {
            defs: STANDARD_DEFS,
        }
    }

    /// Build a catalog from exactly one definition per kind.
    pub fn new(defs: impl IntoIterator<Item = PieceDef>) -> Result<Self, ConfigError> {
        let mut slots: [Option<PieceDef>; 7] = [None; 7];
        for def in defs {
            def.validate()?;
            let s = &mut slots[slot(def.kind)];
            if s.is_some() {
                return Err(ConfigError::DuplicatePiece(def.kind));
            }
            *s = Some(def);
        }

        let mut out = STANDARD_DEFS;
        for kind in PieceKind::ALL {
            out[slot(kind)] = slots[slot(kind)].ok_or(ConfigError::MissingPiece(kind))?;
        }
        Ok(Self { defs: out })
    }

    pub fn def(&self, kind: PieceKind) -> &PieceDef {
        &self.defs[slot(kind)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceDef> {
        self.defs.iter()
    }

    /// Fail if some piece is wider than `cols` in its spawn orientation.
    pub fn check_fits(&self, cols: usize) -> Result<(), ConfigError> {
        for def in &self.defs {
            let width = def.matrix.bounds().map_or(0, |b| b.width());
            if width > cols {
                return Err(ConfigError::BoardTooNarrow {
                    cols,
                    kind: def.kind,
                    width,
                });
            }
        }
        Ok(())
    }

    /// Spawn anchor: occupied box centred horizontally (rounded left), matrix
    /// top on board row 0.
    pub fn spawn_anchor(&self, kind: PieceKind, cols: usize) -> Anchor {
        spawn_anchor(&self.def(kind).matrix, cols)
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The whole matrix starts on the board, so a fresh piece can turn in place.
pub fn spawn_anchor(matrix: &PieceMatrix, cols: usize) -> Anchor {
    match matrix.bounds() {
        Some(b) => Anchor::new((cols as i32 - b.width() as i32) / 2 - b.min_col as i32, 0),
        None => Anchor::new(0, 0),
    }
}

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub anchor: Anchor,
    pub rotation: Rotation,
}

impl ActivePiece {
    /// A piece in spawn orientation at its spawn anchor.
    pub fn spawn(def: &PieceDef, cols: usize) -> Self {
        Self {
            kind: def.kind,
            matrix: def.matrix,
            anchor: spawn_anchor(&def.matrix, cols),
            rotation: Rotation::North,
        }
    }

    /// Board coordinates `(x, y)` of every occupied cell.
    pub fn board_cells(&self) -> ArrayVec<(i32, i32), { MATRIX_SIZE * MATRIX_SIZE }> {
        self.matrix
            .cells()
            .iter()
            .map(|&(r, c)| (self.anchor.x + c as i32, self.anchor.y + r as i32))
            .collect()
    }

    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: Anchor::new(self.anchor.x + dx, self.anchor.y + dy),
            ..*self
        }
    }
}
