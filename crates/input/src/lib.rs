//! Terminal input mapping.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. The session decides what an
//! action means in its current phase; this crate only knows keys.

pub mod map;

pub use tera_tetris_types as types;

pub use map::{handle_key_event, should_clear_scores, should_quit};
