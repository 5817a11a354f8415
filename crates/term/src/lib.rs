//! Terminal rendering layer.
//!
//! Renders session snapshots into a simple framebuffer that is flushed to the terminal with
//! crossterm. No widget toolkit: the board is drawn cell by cell, 2 columns per arena cell.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot + HUD info -> framebuffer (pure)
//! - [`renderer`]: framebuffer -> terminal, diffed against the previous frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tera_tetris_core as core;
pub use tera_tetris_scores as scores;
pub use tera_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, HudInfo, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
