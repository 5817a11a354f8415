//! Tera Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `tera_tetris::{core,input,scores,term,types}` and hosts the
//! pieces shared by the terminal binary: [`config::AppConfig`] and [`activity::ActivityLog`].

pub mod activity;
pub mod config;

pub use tera_tetris_core as core;
pub use tera_tetris_input as input;
pub use tera_tetris_scores as scores;
pub use tera_tetris_term as term;
pub use tera_tetris_types as types;

pub use activity::ActivityLog;
pub use config::AppConfig;
