//! Piece factory, rotation and wall kick tests

use tera_tetris::core::{
    create_piece, resolve_rotation, rotate, spawn_position, Arena, PieceGenerator, Randomizer,
};
use tera_tetris::types::{PieceKind, Position, RotationDirection};

#[test]
fn test_every_kind_has_four_cells_with_its_fill() {
    for kind in PieceKind::ALL {
        let shape = create_piece(kind);
        assert_eq!(shape.kind(), kind);
        assert_eq!(shape.occupied().count(), 4, "{kind:?}");
        assert!(shape.occupied().all(|(_, _, v)| v == kind.fill()), "{kind:?}");
    }
}

#[test]
fn test_fill_values_are_fixed() {
    let fills: Vec<u8> = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ]
    .iter()
    .map(|k| k.fill())
    .collect();
    assert_eq!(fills, [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = create_piece(kind);
        for dir in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let mut s = shape.clone();
            for _ in 0..4 {
                s = rotate(&s, dir);
            }
            assert_eq!(s, shape, "{kind:?} {dir:?}");
        }
    }
}

#[test]
fn test_rotate_then_reverse_is_identity() {
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
fn test_rotation_keeps_cell_count() {
    for kind in PieceKind::ALL {
        let r = rotate(&create_piece(kind), RotationDirection::Clockwise);
        assert_eq!(r.occupied().count(), 4);
    }
}

#[test]
fn test_spawn_is_centered_on_top_row() {
    assert_eq!(spawn_position(&create_piece(PieceKind::O), 10), Position::new(4, 0));
    assert_eq!(spawn_position(&create_piece(PieceKind::I), 10), Position::new(3, 0));
    assert_eq!(spawn_position(&create_piece(PieceKind::T), 10), Position::new(3, 0));
    assert_eq!(spawn_position(&create_piece(PieceKind::T), 4), Position::new(0, 0));
}

#[test]
fn test_rotation_in_open_space_keeps_position() {
    let arena = Arena::new(10, 20);
    let t = create_piece(PieceKind::T);
    let (shape, pos) =
        resolve_rotation(&arena, &t, Position::new(4, 5), RotationDirection::Clockwise)
            .expect("free rotation");
    assert_eq!(pos, Position::new(4, 5));
    assert_eq!(shape, rotate(&t, RotationDirection::Clockwise));
}

#[test]
fn test_wall_kick_off_right_wall() {
    let arena = Arena::new(10, 20);
    let i = create_piece(PieceKind::I);
    // Vertical I in column 8; horizontal would span 7..=10.
    let (_, pos) = resolve_rotation(&arena, &i, Position::new(7, 5), RotationDirection::Clockwise)
        .expect("kick");
    // +1 still collides, then -2 from there.
    assert_eq!(pos, Position::new(6, 5));
}

#[test]
fn test_wall_kick_off_left_wall() {
    let arena = Arena::new(10, 20);
    let i = create_piece(PieceKind::I);
    // Vertical I in column 0; horizontal would span -1..=2.
    let (_, pos) = resolve_rotation(&arena, &i, Position::new(-1, 5), RotationDirection::Clockwise)
        .expect("kick");
    assert_eq!(pos, Position::new(0, 5));
}

#[test]
fn test_rotation_rejected_when_no_kick_fits() {
    let mut arena = Arena::new(10, 20);
    // Row 6 is occupied except one column: no 4-wide span fits.
    for x in 0..10 {
        if x != 4 {
            arena.set(x, 6, 1);
        }
    }
    let i = create_piece(PieceKind::I);
    assert!(
        resolve_rotation(&arena, &i, Position::new(3, 5), RotationDirection::Clockwise).is_none()
    );
}

#[test]
fn test_generator_is_deterministic_per_seed() {
    let draw = |seed| {
        let mut g = PieceGenerator::new(seed, Randomizer::Uniform);
        (0..32).map(|_| g.next_kind()).collect::<Vec<_>>()
    };
    assert_eq!(draw(42), draw(42));
}

#[test]
fn test_bag_yields_each_kind_once_per_seven() {
    let mut g = PieceGenerator::new(9, Randomizer::Bag);
    for _ in 0..3 {
        let mut bag: Vec<_> = (0..7).map(|_| g.next_kind()).collect();
        bag.sort_by_key(|k| k.fill());
        assert_eq!(bag.len(), 7);
        bag.dedup();
        assert_eq!(bag.len(), 7);
    }
}

#[test]
fn test_scripted_cycles() {
    let mut g = PieceGenerator::new(
        1,
        Randomizer::parse("scripted:IO").expect("valid script"),
    );
    let kinds: Vec<_> = (0..5).map(|_| g.next_kind()).collect();
    assert_eq!(
        kinds,
        [PieceKind::I, PieceKind::O, PieceKind::I, PieceKind::O, PieceKind::I]
    );
}
