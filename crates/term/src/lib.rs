//! Terminal rendering.
//!
//! A small game-oriented rendering layer: a snapshot is drawn into a plain
//! framebuffer, which is then flushed to the terminal with crossterm.
//! Board cells are drawn 2 columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
