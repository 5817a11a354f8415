//! Pieces module - piece factory, matrix rotation and wall kicks
//!
//! Shapes are small square matrices stored inline. Each kind writes its own
//! fill value, so the arena keeps enough information to color a cell without
//! a side table.
//!
//! Rotation is a plain matrix rotation (transpose + reverse). Collisions after
//! rotating are resolved with a horizontal kick search that alternates sides
//! with growing distance: +1, -2, +3, -4, ... (relative steps).

use arrayvec::ArrayVec;

use crate::arena::Arena;
use crate::types::{Cell, PieceKind, Position, RotationDirection, EMPTY, MAX_SHAPE_SIZE};

/// One shape row, stored inline
pub type ShapeRow = ArrayVec<Cell, MAX_SHAPE_SIZE>;

/// A square matrix of cells for one piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    rows: ArrayVec<ShapeRow, MAX_SHAPE_SIZE>,
}

impl Shape {
    /// Build a shape from rows. Rows must form a square of edge `1..=4`.
    pub fn from_rows(kind: PieceKind, rows: &[&[Cell]]) -> Self {
        debug_assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_SIZE);
        debug_assert!(rows.iter().all(|r| r.len() == rows.len()));

        let rows = rows
            .iter()
            .map(|r| r.iter().copied().collect::<ShapeRow>())
            .collect();
        Self { kind, rows }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn rows(&self) -> &[ShapeRow] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(EMPTY)
    }

    /// Iterate `(x, y, value)` over non-empty cells, row-major
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != EMPTY)
                .map(move |(x, v)| (x, y, *v))
        })
    }
}

/// Piece factory: the fixed grid for a kind.
pub fn create_piece(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::from_rows(kind, &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]]),
        PieceKind::O => Shape::from_rows(kind, &[&[2, 2], &[2, 2]]),
        PieceKind::L => Shape::from_rows(kind, &[&[0, 3, 0], &[0, 3, 0], &[0, 3, 3]]),
        PieceKind::J => Shape::from_rows(kind, &[&[0, 4, 0], &[0, 4, 0], &[4, 4, 0]]),
        PieceKind::I => Shape::from_rows(
            kind,
            &[&[0, 5, 0, 0], &[0, 5, 0, 0], &[0, 5, 0, 0], &[0, 5, 0, 0]],
        ),
        PieceKind::S => Shape::from_rows(kind, &[&[0, 6, 6], &[6, 6, 0], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(kind, &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]]),
    }
}

/// Spawn position for a shape: top row, horizontally centered.
pub fn spawn_position(shape: &Shape, arena_width: usize) -> Position {
    let x = (arena_width as i32 - shape.width() as i32).div_euclid(2);
    Position::new(x, 0)
}

/// Rotate a shape 90° and return the new grid.
///
/// Transpose, then reverse each row (clockwise) or the row order (counter-clockwise).
pub fn rotate(shape: &Shape, direction: RotationDirection) -> Shape {
    let n = shape.height();
    let mut rows: ArrayVec<ShapeRow, MAX_SHAPE_SIZE> = (0..n)
        .map(|y| (0..n).map(|x| shape.get(y, x)).collect())
        .collect();

    match direction {
        RotationDirection::Clockwise => rows.iter_mut().for_each(|row| row.reverse()),
        RotationDirection::CounterClockwise => rows.reverse(),
    }

    Shape {
        kind: shape.kind,
        rows,
    }
}

/// Rotate with wall kicks.
///
/// Returns the rotated shape and the kicked position, or `None` when no kick within
/// the shape's width resolves the overlap (the caller keeps the old shape and position).
pub fn resolve_rotation(
    arena: &Arena,
    shape: &Shape,
    position: Position,
    direction: RotationDirection,
) -> Option<(Shape, Position)> {
    let rotated = rotate(shape, direction);
    let limit = rotated.width() as i32;

    let mut pos = position;
    let mut offset: i32 = 1;
    while arena.collides(&rotated, pos) {
        pos.x += offset;
        offset = -(offset + offset.signum());
        if offset.abs() > limit {
            return None;
        }
    }

    Some((rotated, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_dimensions() {
        assert_eq!(create_piece(PieceKind::O).width(), 2);
        assert_eq!(create_piece(PieceKind::I).width(), 4);
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::J,
            PieceKind::L,
        ] {
            let shape = create_piece(kind);
            assert_eq!(shape.width(), 3, "{kind:?}");
            assert_eq!(shape.height(), 3, "{kind:?}");
        }
    }

    #[test]
    fn test_factory_fill_values_match_kind() {
        for kind in PieceKind::ALL {
            let shape = create_piece(kind);
            assert_eq!(shape.occupied().count(), 4, "{kind:?}");
            assert!(shape.occupied().all(|(_, _, v)| v == kind.fill()));
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = create_piece(PieceKind::T);
        let r = rotate(&t, RotationDirection::Clockwise);
        let expected = Shape::from_rows(PieceKind::T, &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]]);
        assert_eq!(r, expected);
    }

    #[test]
    fn test_rotate_t_counter_clockwise() {
        let t = create_piece(PieceKind::T);
        let r = rotate(&t, RotationDirection::CounterClockwise);
        let expected = Shape::from_rows(PieceKind::T, &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]);
        assert_eq!(r, expected);
    }

    #[test]
    fn test_rotate_cw_then_ccw_is_identity() {
        for kind in PieceKind::ALL {
            let shape = create_piece(kind);
            let back = rotate(
                &rotate(&shape, RotationDirection::Clockwise),
                RotationDirection::CounterClockwise,
            );
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_position_is_centered() {
        assert_eq!(spawn_position(&create_piece(PieceKind::I), 10), Position::new(3, 0));
        assert_eq!(spawn_position(&create_piece(PieceKind::O), 10), Position::new(4, 0));
        assert_eq!(spawn_position(&create_piece(PieceKind::T), 10), Position::new(3, 0));
    }

    #[test]
    fn test_resolve_rotation_free_space_keeps_position() {
        let arena = Arena::new(10, 20);
        let t = create_piece(PieceKind::T);
        let (shape, pos) =
            resolve_rotation(&arena, &t, Position::new(4, 5), RotationDirection::Clockwise)
                .unwrap();
        assert_eq!(pos, Position::new(4, 5));
        assert_eq!(shape, rotate(&t, RotationDirection::Clockwise));
    }

    #[test]
    fn test_resolve_rotation_kicks_off_left_wall() {
        let arena = Arena::new(10, 20);
        // Vertical I in column 1 of its grid; at x = -1 it hugs the left wall.
        let i = create_piece(PieceKind::I);
        assert!(!arena.collides(&i, Position::new(-1, 5)));

        // Clockwise it becomes horizontal in row 1 spanning columns 0..4 -> x=-1 is out.
        let (shape, pos) =
            resolve_rotation(&arena, &i, Position::new(-1, 5), RotationDirection::Clockwise)
                .unwrap();
        assert_eq!(pos, Position::new(0, 5));
        assert!(!arena.collides(&shape, pos));
    }

    #[test]
    fn test_resolve_rotation_rejected_when_boxed_in() {
        // 3-wide well with walls everywhere else: a vertical I cannot turn horizontal.
        let mut arena = Arena::new(10, 20);
        for y in 0..20 {
            for x in 0..10 {
                if x != 4 {
                    arena.set(x, y, 1);
                }
            }
        }
        let i = create_piece(PieceKind::I);
        // Column 1 of the grid sits over arena column 4.
        let pos = Position::new(3, 10);
        assert!(!arena.collides(&i, pos));
        assert!(resolve_rotation(&arena, &i, pos, RotationDirection::Clockwise).is_none());
    }
}
