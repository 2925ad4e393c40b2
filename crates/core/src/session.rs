//! Session module - the game state machine
//!
//! Ties the board, the piece catalog, the randomizer and scoring together and
//! drives the spawn / fall / lock / clear cycle. All calls are synchronous and
//! finish their transition before returning; illegal moves are rejected by
//! returning `false` and never by an error.
//!
//! ```text
//! SPAWNING -> FALLING -> LOCKING -> (LINE_CLEARING) -> SPAWNING
//!     \
//!      `-> GAME_OVER (spawn placement collides)
//! ```

use crate::board::{Anchor, Board};
use crate::config::{ConfigError, SessionConfig};
use crate::pieces::{ActivePiece, PieceMatrix};
use crate::rng::PieceQueue;
use crate::rotation::resolve_rotation;
use crate::scoring::{drop_frames, score_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, PieceKind, START_LEVEL};

/// Observable phase between calls.
///
/// Spawning, locking and line clearing all happen inside a single call, so
/// only these three are ever visible from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Paused,
    GameOver,
}

/// Result of one gravity step or drop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// The piece moved down.
    Moved,
    /// The piece could not move, was merged into the board, and the next
    /// piece was spawned (check [`Session::game_over`]).
    Locked(LockEvent),
    /// Nothing to do: paused, or the game is over.
    Halted,
}

/// One game, from first spawn to game over.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    next: PieceKind,
    queue: PieceQueue,
    score: u32,
    level: u32,
    lines: u32,
    /// Frames advanced since the session (re)started.
    frame: u64,
    frames_since_drop: u32,
    /// Monotonic id of spawned pieces.
    piece_id: u32,
    /// Increments on restart.
    episode_id: u32,
    last_event: Option<LockEvent>,
    paused: bool,
    game_over: bool,
}

/// Create a session with default settings on a `rows x cols` board.
pub fn new_session(rows: usize, cols: usize) -> Result<Session, ConfigError> {
    Session::new(SessionConfig::new(rows, cols))
}

impl Session {
    /// Validate `config`, build an empty board and spawn the first piece.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols)?;
        Ok(Self::start(config, board))
    }

    /// Start on a prepared board. Its size overrides `config.rows`/`config.cols`.
    ///
    /// If the first piece cannot spawn the session starts out game-over.
    pub fn with_board(config: SessionConfig, board: Board) -> Result<Self, ConfigError> {
        let config = SessionConfig {
            rows: board.rows(),
            cols: board.cols(),
            ..config
        };
        config.validate()?;
        Ok(Self::start(config, board))
    }

    fn start(config: SessionConfig, board: Board) -> Self {
        let mut queue = PieceQueue::new(config.seed, config.randomizer.clone());
        let next = queue.draw();

        let mut session = Self {
            config,
            board,
            active: None,
            next,
            queue,
            score: 0,
            level: START_LEVEL,
            lines: 0,
            frame: 0,
            frames_since_drop: 0,
            piece_id: 0,
            episode_id: 0,
            last_event: None,
            paused: false,
            game_over: false,
        };
        session.spawn_piece();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    /// Spawn-orientation matrix of the queued piece
    pub fn next_matrix(&self) -> PieceMatrix {
        self.config.catalog.def(self.next).matrix
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Falling
        }
    }

    /// Frames between gravity steps at the current level
    pub fn drop_interval_frames(&self) -> u32 {
        drop_frames(self.level)
    }

    /// Row the active piece's anchor would rest on after a hard drop
    pub fn ghost_y(&self) -> Option<i32> {
        let active = self.active?;
        Some(active.anchor.y + self.board.drop_distance(&active.matrix, active.anchor))
    }

    fn accepts_input(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Promote the queued piece, queue a new one and place it at the top.
    ///
    /// Returns false and ends the game if the spawn placement collides. The
    /// board is not touched in either case.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let kind = self.next;
        self.next = self.queue.draw();

        let piece = ActivePiece::spawn(self.config.catalog.def(kind), self.board.cols());
        self.frames_since_drop = 0;

        if self.board.collides(&piece.matrix, piece.anchor) {
            self.active = None;
            self.game_over = true;
            log::info!(
                "game over: {} blocked at spawn, score {} level {} lines {}",
                kind.as_str(),
                self.score,
                self.level,
                self.lines
            );
            return false;
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        self.active = Some(piece);
        log::debug!(
            "spawned {} at ({}, {}), next {}",
            kind.as_str(),
            piece.anchor.x,
            piece.anchor.y,
            self.next.as_str()
        );
        true
    }

    /// Advance one frame; runs a gravity step when the level's cadence is due.
    pub fn tick(&mut self) -> Option<Fall> {
        if !self.accepts_input() {
            return None;
        }

        self.frame = self.frame.wrapping_add(1);
        self.frames_since_drop += 1;

        if self.frames_since_drop >= self.drop_interval_frames() {
            self.frames_since_drop = 0;
            return Some(self.soft_drop());
        }
        None
    }

    /// Move down one row, or lock if the piece cannot fall.
    pub fn soft_drop(&mut self) -> Fall {
        if !self.accepts_input() {
            return Fall::Halted;
        }
        let Some(active) = self.active else {
            return Fall::Halted;
        };

        let below = active.moved(0, 1);
        if !self.board.collides(&below.matrix, below.anchor) {
            self.active = Some(below);
            return Fall::Moved;
        }

        self.lock_active(active)
    }

    /// Drop to the resting row and lock immediately.
    pub fn hard_drop(&mut self) -> Fall {
        if !self.accepts_input() {
            return Fall::Halted;
        }
        let Some(active) = self.active else {
            return Fall::Halted;
        };

        let distance = self.board.drop_distance(&active.matrix, active.anchor);
        self.lock_active(active.moved(0, distance))
    }

    pub fn hard_or_soft_drop(&mut self, hard: bool) -> Fall {
        if hard {
            self.hard_drop()
        } else {
            self.soft_drop()
        }
    }

    fn lock_active(&mut self, piece: ActivePiece) -> Fall {
        self.active = None;

        if !self.board.lock_piece(&piece.matrix, piece.anchor) {
            // Only reachable if the active piece was already overlapping.
            log::error!(
                "{} could not lock at ({}, {}); ending game",
                piece.kind.as_str(),
                piece.anchor.x,
                piece.anchor.y
            );
            self.game_over = true;
            return Fall::Halted;
        }

        let cleared = self.board.clear_lines() as u32;
        let previous_level = self.level;
        let result = score_lines(self.score, self.level, cleared);
        self.score = result.score;
        self.level = result.level;
        self.lines += cleared;

        if cleared > 0 {
            log::debug!(
                "{} locked, cleared {} line(s) for {} points",
                piece.kind.as_str(),
                cleared,
                result.gained
            );
        }
        if self.level != previous_level {
            log::info!("level {} -> {} at score {}", previous_level, self.level, self.score);
        }

        let event = LockEvent {
            kind: piece.kind,
            lines_cleared: cleared,
            score_gained: result.gained,
            level: self.level,
        };
        self.last_event = Some(event);

        self.spawn_piece();
        Fall::Locked(event)
    }

    /// Shift the piece `delta` columns.
    ///
    /// The target is clamped so the piece stays between the walls, and every
    /// column on the way there must be free, so pieces never pass through
    /// blocks. Returns whether the piece moved.
    pub fn move_horizontal(&mut self, delta: i32) -> bool {
        if !self.accepts_input() || delta == 0 {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let Some(bounds) = active.matrix.bounds() else {
            return false;
        };

        let min_x = -(bounds.min_col as i32);
        let max_x = self.board.cols() as i32 - 1 - bounds.max_col as i32;
        let target = (active.anchor.x + delta).clamp(min_x, max_x);
        if target == active.anchor.x {
            return false;
        }

        let step = (target - active.anchor.x).signum();
        let mut x = active.anchor.x;
        while x != target {
            x += step;
            if self
                .board
                .collides(&active.matrix, Anchor::new(x, active.anchor.y))
            {
                return false;
            }
        }

        self.active = Some(ActivePiece {
            anchor: Anchor::new(target, active.anchor.y),
            ..active
        });
        true
    }

    /// Rotate the piece; on failure nothing changes.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let def = self.config.catalog.def(active.kind);
        match resolve_rotation(&self.board, &active, def, clockwise) {
            Ok(Some(rotated)) => {
                self.active = Some(rotated);
                true
            }
            Ok(None) => false,
            Err(err) => {
                log::error!("rejected rotation of {}: {}", active.kind.as_str(), err);
                false
            }
        }
    }

    /// Toggle pause; returns the new state. Ignored after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// Start over on an empty board with the same configuration.
    ///
    /// The random stream continues rather than replaying the previous game.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = self.queue.draw();
        self.score = 0;
        self.level = START_LEVEL;
        self.lines = 0;
        self.frame = 0;
        self.frames_since_drop = 0;
        self.piece_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.last_event = None;
        self.paused = false;
        self.game_over = false;
        log::info!("restarted, episode {}", self.episode_id);
        self.spawn_piece();
    }

    /// Apply a front-end action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => self.soft_drop() != Fall::Halted,
            GameAction::HardDrop => self.hard_drop() != Fall::Halted,
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Pause => {
                let before = self.paused;
                self.toggle_pause() != before
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Read-only copy of everything a front end draws.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            board: self.board.playable_rows().map(|r| r.to_vec()).collect(),
            active: self.active.map(ActiveSnapshot::from),
            ghost_y: self.ghost_y(),
            next: self.next,
            next_matrix: *self.next_matrix().rows(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            frame: self.frame,
            piece_id: self.piece_id,
            episode_id: self.episode_id,
            last_event: self.last_event,
            paused: self.paused,
            game_over: self.game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Randomizer;
    use crate::types::Rotation;

    fn fixed(kinds: &[PieceKind]) -> SessionConfig {
        SessionConfig::default().with_randomizer(Randomizer::Sequence(kinds.to_vec()))
    }

    #[test]
    fn test_new_session_spawns_first_piece() {
        let session = Session::new(fixed(&[PieceKind::T, PieceKind::I])).unwrap();
        let active = session.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(active.anchor, Anchor::new(3, 0));
        assert_eq!(session.next(), PieceKind::I);
        assert_eq!(session.level(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.piece_id(), 1);
        assert_eq!(session.phase(), Phase::Falling);
    }

    #[test]
    fn test_tick_drops_on_level_cadence() {
        let mut session = Session::new(fixed(&[PieceKind::T])).unwrap();
        let y0 = session.active().unwrap().anchor.y;

        for _ in 0..59 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.active().unwrap().anchor.y, y0);
        assert_eq!(session.tick(), Some(Fall::Moved));
        assert_eq!(session.active().unwrap().anchor.y, y0 + 1);
        assert_eq!(session.frame(), 60);
    }

    #[test]
    fn test_pause_freezes_ticks_and_input() {
        let mut session = Session::new(fixed(&[PieceKind::T])).unwrap();
        assert!(session.apply_action(GameAction::Pause));
        assert_eq!(session.phase(), Phase::Paused);
        for _ in 0..200 {
            assert_eq!(session.tick(), None);
        }
        assert!(!session.move_horizontal(1));
        assert_eq!(session.soft_drop(), Fall::Halted);
        assert_eq!(session.frame(), 0);
        assert!(session.apply_action(GameAction::Pause));
        assert_eq!(session.phase(), Phase::Falling);
    }

    #[test]
    fn test_hard_drop_locks_at_the_floor() {
        let mut session = Session::new(fixed(&[PieceKind::O, PieceKind::T])).unwrap();
        let Fall::Locked(event) = session.hard_drop() else {
            panic!("hard drop should lock");
        };
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(session.board().get(4, 19), Some(PieceKind::O.tag()));
        assert_eq!(session.board().get(5, 18), Some(PieceKind::O.tag()));
        assert_eq!(session.active().unwrap().kind, PieceKind::T);
        assert_eq!(session.piece_id(), 2);
    }

    #[test]
    fn test_ghost_y_matches_hard_drop() {
        let mut session = Session::new(fixed(&[PieceKind::T])).unwrap();
        let ghost = session.ghost_y().unwrap();
        let x = session.active().unwrap().anchor.x;
        session.hard_drop();
        // T spans two rows; its bottom row lands on row 19.
        assert_eq!(ghost, 18);
        assert_eq!(session.board().get(x + 1, 19), Some(PieceKind::T.tag()));
    }

    #[test]
    fn test_restart_resets_state_and_bumps_episode() {
        let mut session = Session::new(fixed(&[PieceKind::I])).unwrap();
        session.hard_drop();
        assert!(session.board().filled_cells() > 0);

        assert!(session.apply_action(GameAction::Restart));
        assert_eq!(session.board().filled_cells(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.episode_id(), 1);
        assert_eq!(session.piece_id(), 1);
        assert!(session.last_event().is_none());
        assert!(!session.game_over());
    }

    #[test]
    fn test_take_last_event_clears_it() {
        let mut session = Session::new(fixed(&[PieceKind::I])).unwrap();
        session.hard_drop();
        assert!(session.take_last_event().is_some());
        assert!(session.take_last_event().is_none());
    }
}
