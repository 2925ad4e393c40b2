use serde::Deserialize;

use blockfall::core::{Randomizer, Session, SessionConfig};
use blockfall::types::{PieceKind, FLOOR_TAG};

/// What a front end in another process would read back.
#[derive(Debug, Deserialize)]
struct WireSnapshot {
    rows: usize,
    cols: usize,
    board: Vec<Vec<u8>>,
    active: Option<WireActive>,
    next: String,
    level: u32,
    game_over: bool,
}

#[derive(Debug, Deserialize)]
struct WireActive {
    kind: String,
    rotation: String,
    matrix: [[u8; 4]; 4],
}

fn session(kinds: &[PieceKind]) -> Session {
    Session::new(SessionConfig::default().with_randomizer(Randomizer::Sequence(kinds.to_vec())))
        .unwrap()
}

#[test]
fn snapshot_board_excludes_the_floor() {
    let snap = session(&[PieceKind::T]).snapshot();
    assert_eq!(snap.rows, 20);
    assert_eq!(snap.cols, 10);
    assert_eq!(snap.board.len(), 20);
    assert!(snap.board.iter().all(|row| row.len() == 10));
    assert!(snap.board.iter().flatten().all(|&c| c != FLOOR_TAG));
}

#[test]
fn snapshot_json_has_stable_field_names() {
    let s = session(&[PieceKind::T, PieceKind::I]);
    let v = serde_json::to_value(s.snapshot()).unwrap();

    assert_eq!(v["active"]["kind"], "t");
    assert_eq!(v["active"]["rotation"], "north");
    assert_eq!(v["active"]["x"], 3);
    assert_eq!(v["active"]["y"], 0);
    assert_eq!(v["next"], "i");
    assert_eq!(v["ghost_y"], 18);
    assert_eq!(v["score"], 0);
    assert_eq!(v["level"], 1);
    assert_eq!(v["paused"], false);
    assert_eq!(v["game_over"], false);
    assert!(v["last_event"].is_null());
    assert_eq!(v["board"].as_array().unwrap().len(), 20);
    assert_eq!(v["next_matrix"][1], serde_json::json!([8, 8, 8, 8]));
}

#[test]
fn snapshot_json_reports_last_lock() {
    let mut s = session(&[PieceKind::O]);
    s.hard_drop();
    let v = serde_json::to_value(s.snapshot()).unwrap();

    assert_eq!(v["last_event"]["kind"], "o");
    assert_eq!(v["last_event"]["lines_cleared"], 0);
    assert_eq!(v["last_event"]["score_gained"], 0);
    assert_eq!(v["board"][19][4], PieceKind::O.tag());
    assert_eq!(v["piece_id"], 2);
}

#[test]
fn snapshot_is_a_copy() {
    let mut s = session(&[PieceKind::T]);
    let before = s.snapshot();
    s.move_horizontal(1);
    assert_eq!(before.active.unwrap().x, 3);
    assert_eq!(s.snapshot().active.unwrap().x, 4);
}

#[test]
fn snapshot_json_decodes_into_a_typed_view() {
    let mut s = session(&[PieceKind::L, PieceKind::J]);
    s.soft_drop();
    s.rotate(true);
    let json = serde_json::to_string(&s.snapshot()).unwrap();
    let wire: WireSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!((wire.rows, wire.cols), (20, 10));
    assert_eq!(wire.board.len(), wire.rows);
    assert_eq!(wire.next, "j");
    assert_eq!(wire.level, 1);
    assert!(!wire.game_over);

    let active = wire.active.unwrap();
    assert_eq!(active.kind, "l");
    assert_eq!(active.rotation, "east");
    let cells = active.matrix.iter().flatten().filter(|&&c| c != 0).count();
    assert_eq!(cells, 4);
}
