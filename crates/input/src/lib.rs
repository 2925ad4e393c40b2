//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Holds no
//! game state; the binary forwards each action straight to the session.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
