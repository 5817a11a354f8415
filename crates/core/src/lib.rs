//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the session state machine. It has **no dependencies**
//! on rendering, terminals or storage:
//!
//! - **Deterministic**: the same [`GameConfig`] (seed + randomizer) replays the same game
//! - **Testable**: every rule is a plain function or a method returning `bool`/`Option`
//! - **Portable**: hosts only call commands, `tick` and `snapshot_into`
//!
//! # Module Structure
//!
//! - [`arena`]: the placement grid with collision, merge and line sweep
//! - [`pieces`]: piece factory, matrix rotation and the wall-kick search
//! - [`scoring`]: line clear points, levels and gravity timing
//! - [`stability`]: support ratio and the topple simulation
//! - [`rng`]: seeded piece selection (uniform, 7-bag, scripted)
//! - [`config`]: per-session configuration, loadable from the environment
//! - [`session`]: phases, drop clock, commands and events
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use tera_tetris_core::{GameConfig, Randomizer, Session};
//! use tera_tetris_core::types::{GameAction, PieceKind};
//!
//! let config = GameConfig::default().with_randomizer(Randomizer::Scripted(vec![PieceKind::O]));
//! let mut session = Session::new(config);
//! session.start();
//!
//! session.apply_action(GameAction::MoveLeft);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.arena().occupied_count(), 4);
//! assert_eq!(session.lines(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`] every frame with the elapsed milliseconds. Gravity moves the piece
//! one row each time the accumulated time reaches
//! [`drop_interval_ms`](scoring::drop_interval_ms) for the current level.

pub mod arena;
pub mod config;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod stability;

pub use tera_tetris_types as types;

// Re-export commonly used types for convenience
pub use arena::Arena;
pub use config::GameConfig;
pub use pieces::{create_piece, resolve_rotation, rotate, spawn_position, Shape};
pub use rng::{PieceGenerator, Randomizer, SimpleRng};
pub use scoring::{apply_line_clear, drop_interval_ms, LineClearOutcome, Stats};
pub use session::{ActivePiece, Session};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use stability::{compute_stability, settle, simulate_fall, unstable_cells, LooseCell};
