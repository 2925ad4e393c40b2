//! Board tests - grid, floor row, collision and line clearing

use blockfall::core::{Anchor, Board, ConfigError, PieceCatalog};
use blockfall::types::{PieceKind, EMPTY, FLOOR_TAG};

fn matrix(kind: PieceKind) -> blockfall::core::PieceMatrix {
    PieceCatalog::standard().def(kind).matrix
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(20, 10).unwrap();
    assert_eq!(board.rows(), 20);
    assert_eq!(board.cols(), 10);
    assert_eq!(board.height(), 21);

    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(board.get(x, y), Some(EMPTY), "cell ({x}, {y})");
        }
    }
    for x in 0..10 {
        assert_eq!(board.get(x, 20), Some(FLOOR_TAG));
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(20, 10).unwrap();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 21), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(20, 10).unwrap();

    assert!(board.set(5, 10, PieceKind::T.tag()));
    assert_eq!(board.get(5, 10), Some(PieceKind::T.tag()));
    assert!(!board.is_free(5, 10));

    assert!(board.set(5, 10, EMPTY));
    assert!(board.is_free(5, 10));

    assert!(!board.set(-1, 0, 2));
    assert!(!board.set(10, 0, 2));
    assert!(!board.set(0, 20, EMPTY));
}

#[test]
fn test_zero_sized_board_is_rejected() {
    assert_eq!(
        Board::new(0, 10),
        Err(ConfigError::ZeroDimension { rows: 0, cols: 10 })
    );
    let empty: [[u8; 0]; 0] = [];
    assert_eq!(
        Board::from_rows(&empty),
        Err(ConfigError::ZeroDimension { rows: 0, cols: 0 })
    );
}

#[test]
fn test_collides_with_walls_top_and_floor() {
    let board = Board::new(20, 10).unwrap();
    let t = matrix(PieceKind::T);

    assert!(!board.collides(&t, Anchor::new(0, 0)));
    assert!(!board.collides(&t, Anchor::new(7, 18)));

    assert!(board.collides(&t, Anchor::new(-1, 5)));
    assert!(board.collides(&t, Anchor::new(8, 5)));
    assert!(board.collides(&t, Anchor::new(3, -1)));
    // Bottom row of the T would sit on the floor.
    assert!(board.collides(&t, Anchor::new(3, 19)));
}

#[test]
fn test_collides_with_filled_cell() {
    let mut board = Board::new(20, 10).unwrap();
    board.set(4, 6, PieceKind::Z.tag());
    let t = matrix(PieceKind::T);

    assert!(board.collides(&t, Anchor::new(3, 5)));
    assert!(!board.collides(&t, Anchor::new(3, 3)));
}

#[test]
fn test_drop_distance() {
    let mut board = Board::new(20, 10).unwrap();
    let t = matrix(PieceKind::T);
    assert_eq!(board.drop_distance(&t, Anchor::new(3, 0)), 18);

    board.set(4, 10, PieceKind::I.tag());
    assert_eq!(board.drop_distance(&t, Anchor::new(3, 0)), 8);
    assert_eq!(board.drop_distance(&t, Anchor::new(3, 9)), 0);
}

#[test]
fn test_clear_single_line_shifts_rows_down() {
    let mut board = Board::from_rows(&[
        [0u8, 0, 0],
        [2, 0, 0],
        [3, 3, 3],
        [0, 4, 0],
    ])
    .unwrap();

    assert_eq!(board.clear_lines(), 1);
    let rows: Vec<&[u8]> = board.playable_rows().collect();
    assert_eq!(rows, vec![&[0u8, 0, 0][..], &[0, 0, 0], &[2, 0, 0], &[0, 4, 0]]);
    assert_eq!(board.height(), 5);
    assert_eq!(board.row(4), Some(&[FLOOR_TAG; 3][..]));
}

#[test]
fn test_clear_non_adjacent_lines() {
    let mut board = Board::from_rows(&[
        [5u8, 0, 5],
        [2, 2, 2],
        [0, 6, 0],
        [3, 3, 3],
    ])
    .unwrap();

    assert_eq!(board.clear_lines(), 2);
    let rows: Vec<&[u8]> = board.playable_rows().collect();
    assert_eq!(rows, vec![&[0u8, 0, 0][..], &[0, 0, 0], &[5, 0, 5], &[0, 6, 0]]);
}

#[test]
fn test_clear_every_row() {
    let mut board = Board::from_rows(&[[7u8, 7], [8, 8]]).unwrap();
    assert_eq!(board.clear_lines(), 2);
    assert_eq!(board.filled_cells(), 0);
    assert_eq!(board.row(2), Some(&[FLOOR_TAG; 2][..]));
}

#[test]
fn test_clear_nothing() {
    let mut board = Board::from_rows(&[[0u8, 2], [2, 0]]).unwrap();
    let before = board.clone();
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_lock_and_clear_bottom_row() {
    let mut board = Board::new(20, 10).unwrap();
    for x in 0..10 {
        if !(3..=6).contains(&x) {
            board.set(x, 19, PieceKind::L.tag());
        }
    }
    let i = matrix(PieceKind::I);
    // The I bar occupies row 1 of its matrix.
    assert!(board.lock_piece(&i, Anchor::new(3, 18)));
    assert!(board.is_row_full(19));
    assert_eq!(board.clear_lines(), 1);
    assert_eq!(board.filled_cells(), 0);
}
