//! Snapshot module - read-only copies of session state for renderers
//!
//! Hosts keep one [`GameSnapshot`] and refill it every frame with
//! [`Session::snapshot_into`](crate::session::Session::snapshot_into), so the render loop does
//! not reallocate the arena copy.

use crate::pieces::Shape;
use crate::scoring::Stats;
use crate::types::{Cell, PieceKind, Position, SessionPhase, EMPTY};

/// The falling piece as a renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub position: Position,
}

impl ActiveSnapshot {
    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    /// Arena coordinates of every occupied cell, with its value
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.shape.occupied().map(move |(sx, sy, v)| {
            (
                self.position.x + sx as i32,
                self.position.y + sy as i32,
                v,
            )
        })
    }
}

/// Read-only copy of a session for rendering and observation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` cells
    pub arena: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<Shape>,
    pub stats: Stats,
    pub phase: SessionPhase,
    pub elapsed_ms: u64,
    pub drop_interval_ms: u32,
    pub stability: Option<u8>,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return EMPTY;
        }
        self.arena.get(y * self.width + x).copied().unwrap_or(EMPTY)
    }

    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == SessionPhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_outside_grid_or_data_is_empty() {
        let snap = GameSnapshot {
            width: 2,
            height: 2,
            arena: vec![1, 2, 3],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.cell(1, 0), 2);
        assert_eq!(snap.cell(0, 1), 3);
        // Inside the grid but past the arena data.
        assert_eq!(snap.cell(1, 1), EMPTY);
        assert_eq!(snap.cell(2, 0), EMPTY);
        assert_eq!(snap.cell(0, 9), EMPTY);
    }
}
