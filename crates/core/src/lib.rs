//! Core simulation - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependencies on terminals, timers or I/O: a front end calls [`Session`]
//! methods and draws from [`Session::snapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: playable grid plus sentinel floor row, collision and line clearing
//! - [`pieces`]: 4x4 piece matrices, pivots, offset tables and the catalog
//! - [`rotation`]: pivot rotation and kick resolution
//! - [`scoring`]: per-line rewards, levels and drop cadence
//! - [`rng`]: seeded piece selection
//! - [`session`]: the spawn / fall / lock / clear state machine
//! - [`config`]: session parameters and construction errors
//!
//! # Example
//!
//! ```
//! use blockfall_core::{new_session, Fall};
//! use blockfall_types::GameAction;
//!
//! let mut session = new_session(20, 10).unwrap();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::RotateCw);
//! assert!(matches!(session.hard_drop(), Fall::Locked(_)));
//!
//! assert_eq!(session.board().filled_cells(), 4);
//! assert!(!session.game_over());
//! ```
//!
//! # Timing
//!
//! Gravity is counted in frames. Call [`Session::tick`] once per frame
//! (the terminal binary uses [`types::TICK_MS`]); the piece falls one row every
//! [`Session::drop_interval_frames`] frames.

pub mod board;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Anchor, Board};
pub use config::{ConfigError, SessionConfig};
pub use pieces::{ActivePiece, PieceCatalog, PieceDef, PieceMatrix, Pivot};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use rotation::{resolve_rotation, rotate_matrix, MatrixBoundsError};
pub use scoring::{drop_frames, next_level, score_lines, ScoreResult};
pub use session::{new_session, Fall, Phase, Session};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
