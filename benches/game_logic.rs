use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tera_tetris::core::{
    compute_stability, create_piece, resolve_rotation, settle, Arena, GameConfig, Session,
};
use tera_tetris::types::{PieceKind, Position, RotationDirection};

/// Bottom half filled in a checker-like pattern with a few floating cells.
fn busy_arena() -> Arena {
    let mut arena = Arena::new(10, 20);
    for y in 10..20 {
        for x in 0..10 {
            if (x + y) % 3 != 0 {
                arena.set(x, y, 1 + (x % 7) as u8);
            }
        }
    }
    arena
}

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(GameConfig::default().with_seed(12345));
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if !session.is_running() {
                session.restart();
            }
            session.tick(black_box(16));
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut arena = Arena::new(10, 20);
            for y in 16..20 {
                for x in 0..10 {
                    arena.set(x, y, 5);
                }
            }
            black_box(arena.sweep());
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let arena = busy_arena();
    let shape = create_piece(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| black_box(arena.collides(&shape, black_box(Position::new(3, 8)))))
    });
}

fn bench_rotation(c: &mut Criterion) {
    let arena = busy_arena();
    let shape = create_piece(PieceKind::I);

    c.bench_function("resolve_rotation", |b| {
        b.iter(|| {
            black_box(resolve_rotation(
                &arena,
                &shape,
                Position::new(7, 4),
                RotationDirection::Clockwise,
            ))
        })
    });
}

fn bench_stability(c: &mut Criterion) {
    let arena = busy_arena();

    c.bench_function("compute_stability", |b| {
        b.iter(|| black_box(compute_stability(black_box(&arena))))
    });
    c.bench_function("settle", |b| b.iter(|| black_box(settle(black_box(&arena)))));
}

criterion_group!(
    benches,
    bench_tick,
    bench_sweep,
    bench_collides,
    bench_rotation,
    bench_stability
);
criterion_main!(benches);
