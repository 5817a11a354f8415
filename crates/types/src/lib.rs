//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, persistence glue).
//!
//! # Arena Dimensions
//!
//! Default playfield dimensions (configurable per session):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: horizontally centered, `y = 0`
//!
//! # Cell Values
//!
//! A [`Cell`] is a small integer: `0` is empty, `1..=7` is occupied and identifies the
//! piece kind that produced it (see [`PieceKind::fill`]).
//!
//! # Drop Timing
//!
//! Gravity interval in milliseconds for a level `L >= 1`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 930ms |
//! | 5 | 720ms |
//! | 13 | 160ms |
//! | 14+ | 120ms floor |
//!
//! # Examples
//!
//! ```
//! use tera_tetris_types::{PieceKind, ARENA_HEIGHT, ARENA_WIDTH};
//!
//! let kind = PieceKind::from_char('t').unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.fill(), 1);
//!
//! assert_eq!(ARENA_WIDTH, 10);
//! assert_eq!(ARENA_HEIGHT, 20);
//! ```

/// Default arena width in cells (10 columns)
pub const ARENA_WIDTH: usize = 10;

/// Default arena height in cells (20 rows)
pub const ARENA_HEIGHT: usize = 20;

/// Smallest arena edge accepted from configuration
pub const MIN_ARENA_EDGE: usize = 4;

/// Largest arena edge accepted from configuration (keeps terminal frame math in `u16`)
pub const MAX_ARENA_EDGE: usize = 200;

/// Largest shape edge (the I piece is 4x4)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Fixed timestep interval used by the terminal host (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 70;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Clears of more than four rows use the last entry.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell in the arena or in a piece shape (`0` = empty).
pub type Cell = u8;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// The seven piece kinds
///
/// Each kind has a distinct fill value so a renderer can map cells straight to colors:
/// - **T**: 1
/// - **O**: 2
/// - **L**: 3
/// - **J**: 4
/// - **I**: 5
/// - **S**: 6
/// - **Z**: 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in the order used by the randomizer
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
    ];

    /// Parse a single-letter kind (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'i' => Some(PieceKind::I),
            'o' => Some(PieceKind::O),
            't' => Some(PieceKind::T),
            's' => Some(PieceKind::S),
            'z' => Some(PieceKind::Z),
            'j' => Some(PieceKind::J),
            'l' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Non-zero cell value written by this kind
    pub fn fill(&self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }
}

/// Top-left offset of a shape in arena coordinates
///
/// `y` grows downwards. Values outside the arena are legal while a piece is being
/// tested against walls; rows above the top (`y < 0`) never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Commands a host can forward to a session
///
/// These are produced by the input dispatcher. Gameplay commands are ignored
/// unless the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if blocked
    SoftDrop,
    /// Drop piece to the lowest legal position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise (with wall kicks)
    RotateCw,
    /// Rotate piece 90° counter-clockwise (with wall kicks)
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a session from the idle state
    Start,
    /// Discard the current session and start a fresh one
    Restart,
    /// Measure stability and topple unsupported cells
    Simulate,
}

/// Session lifecycle phase
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver`, and any phase back to `Idle`
/// through an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Advisory notification emitted by a session.
///
/// Events are for logging and UI only; engine correctness never depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Paused,
    Resumed,
    LinesCleared(u32),
    LeveledUp(u32),
    GameOver { final_score: u32 },
    StabilityComputed(u8),
    StabilityToppled { cells: u32 },
}
