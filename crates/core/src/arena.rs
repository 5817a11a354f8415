//! Arena module - the placement grid
//!
//! The arena is a `width x height` grid of [`Cell`] values stored as one flat,
//! row-major vector (allocated once per session).
//! Coordinates: `(x, y)` with `x` growing right and `y` growing down; row 0 is the top.
//!
//! The arena owns the three grid rules of the game:
//! - **collision**: does a shape at a position overlap walls, floor or placed cells
//! - **merge**: write a shape's cells into the grid
//! - **sweep**: remove full rows and drop everything above them

use crate::pieces::Shape;
use crate::types::{Cell, Position, EMPTY, MAX_ARENA_EDGE, MIN_ARENA_EDGE};

/// The placement grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arena {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Arena {
    /// Create an empty arena. Each edge is clamped to
    /// [`MIN_ARENA_EDGE`]`..=`[`MAX_ARENA_EDGE`].
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.clamp(MIN_ARENA_EDGE, MAX_ARENA_EDGE);
        let height = height.clamp(MIN_ARENA_EDGE, MAX_ARENA_EDGE);
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build an arena from explicit rows (all rows must have the same length).
    ///
    /// Used by tests and tools; no clamping is applied, but the grid must not be empty.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(height > 0 && width > 0, "arena must have at least one cell");
        assert!(
            rows.iter().all(|r| r.len() == width),
            "arena rows must all have the same width"
        );
        Self {
            width,
            height,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and non-empty
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(v) if v != EMPTY)
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != EMPTY).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == EMPTY)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|c| *c != EMPTY)
    }

    /// Clear the entire arena
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Does `shape` at `position` overlap a wall, the floor or an occupied cell?
    ///
    /// Cells above the top edge (row < 0) never collide, so a piece may sit partially
    /// above the visible grid.
    pub fn collides(&self, shape: &Shape, position: Position) -> bool {
        shape.occupied().any(|(sx, sy, _)| {
            let x = position.x + sx as i32;
            let y = position.y + sy as i32;
            if x < 0 || x as usize >= self.width || (y >= 0 && y as usize >= self.height) {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Write every non-empty cell of `shape` at `position`, overwriting what is there.
    ///
    /// Cells that land outside the grid are dropped. Callers are expected to merge only
    /// at positions where [`Arena::collides`] is false.
    pub fn merge(&mut self, shape: &Shape, position: Position) {
        for (sx, sy, value) in shape.occupied() {
            self.set(position.x + sx as i32, position.y + sy as i32, value);
        }
    }

    /// Remove all full rows, shifting the rows above down and refilling the top with
    /// empty rows. Returns the number of rows removed.
    ///
    /// Two-pointer compaction from the bottom up: every row is inspected exactly once
    /// against the original content, so adjacent full rows are never skipped.
    pub fn sweep(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        let mut write_y = self.height;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(EMPTY);
        cleared
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::types::ARENA_WIDTH, crate::types::ARENA_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::create_piece;
    use crate::types::PieceKind;

    #[test]
    fn test_arena_index_calculation() {
        let arena = Arena::new(10, 20);
        assert_eq!(arena.index(0, 0), Some(0));
        assert_eq!(arena.index(9, 0), Some(9));
        assert_eq!(arena.index(0, 1), Some(10));
        assert_eq!(arena.index(9, 19), Some(199));
        assert_eq!(arena.index(-1, 0), None);
        assert_eq!(arena.index(10, 0), None);
        assert_eq!(arena.index(0, 20), None);
    }

    #[test]
    fn test_new_clamps_tiny_dimensions() {
        let arena = Arena::new(1, 2);
        assert_eq!(arena.width(), MIN_ARENA_EDGE);
        assert_eq!(arena.height(), MIN_ARENA_EDGE);

        let arena = Arena::new(40_000, 20);
        assert_eq!(arena.width(), MAX_ARENA_EDGE);
    }

    #[test]
    #[should_panic(expected = "at least one cell")]
    fn test_from_rows_rejects_empty_grid() {
        Arena::from_rows(&[]);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let mut rows = vec![vec![0u8; 10]; 20];
        rows[5][3] = 2;
        rows[10][7] = 3;
        let arena = Arena::from_rows(&rows);
        assert_eq!(arena.to_rows(), rows);
        assert_eq!(arena.occupied_count(), 2);
    }

    #[test]
    fn test_collides_above_top_is_free() {
        let arena = Arena::new(10, 20);
        let t = create_piece(PieceKind::T);
        // Entire shape above the grid.
        assert!(!arena.collides(&t, Position::new(3, -3)));
        // Partially above.
        assert!(!arena.collides(&t, Position::new(3, -1)));
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let arena = Arena::new(10, 20);
        let o = create_piece(PieceKind::O);
        assert!(arena.collides(&o, Position::new(-1, 0)));
        assert!(arena.collides(&o, Position::new(9, 0)));
        assert!(arena.collides(&o, Position::new(0, 19)));
        assert!(!arena.collides(&o, Position::new(8, 18)));
    }

    #[test]
    fn test_collides_with_placed_cells() {
        let mut arena = Arena::new(10, 20);
        arena.set(5, 10, 3);
        let o = create_piece(PieceKind::O);
        assert!(arena.collides(&o, Position::new(4, 9)));
        assert!(!arena.collides(&o, Position::new(6, 9)));
    }

    #[test]
    fn test_collides_ignores_empty_shape_cells() {
        let mut arena = Arena::new(10, 20);
        let t = create_piece(PieceKind::T);
        // Row 0 of the T grid is empty; fill what it would cover.
        arena.set(3, 5, 1);
        arena.set(4, 5, 1);
        arena.set(5, 5, 1);
        assert!(!arena.collides(&t, Position::new(3, 5)));
    }

    #[test]
    fn test_merge_skips_cells_outside() {
        let mut arena = Arena::new(10, 20);
        let i = create_piece(PieceKind::I);
        arena.merge(&i, Position::new(0, -2));
        assert_eq!(arena.occupied_count(), 2);
        assert_eq!(arena.get(1, 0), Some(5));
        assert_eq!(arena.get(1, 1), Some(5));
    }

    #[test]
    fn test_sweep_adjacent_full_rows() {
        let mut arena = Arena::new(4, 6);
        for y in 3..6 {
            for x in 0..4 {
                arena.set(x, y, 1);
            }
        }
        arena.set(0, 2, 7);
        assert_eq!(arena.sweep(), 3);
        assert_eq!(arena.get(0, 5), Some(7));
        assert_eq!(arena.occupied_count(), 1);
    }
}
