//! Stability module - support ratio and topple simulation
//!
//! A placed cell is *supported* when it sits on the bottom row or the cell directly below it is
//! occupied. Nothing else counts (no side support, no connectivity).
//!
//! The topple is a single pass over a snapshot: every unsupported cell is lifted out, then each
//! one falls straight down its column. A pass can leave new unsupported cells behind (cells that
//! were resting on a lifted one); [`settle`] repeats until none remain.

use crate::arena::Arena;
use crate::types::{Cell, EMPTY};

/// An occupied cell without support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LooseCell {
    pub x: usize,
    pub y: usize,
    pub value: Cell,
}

fn is_supported(arena: &Arena, x: usize, y: usize) -> bool {
    y + 1 >= arena.height() || arena.is_occupied(x as i32, y as i32 + 1)
}

/// Percentage of occupied cells that are supported, rounded to the nearest integer.
///
/// An empty arena is fully stable (100).
pub fn compute_stability(arena: &Arena) -> u8 {
    let mut occupied = 0u32;
    let mut supported = 0u32;

    for (y, row) in arena.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell == EMPTY {
                continue;
            }
            occupied += 1;
            if is_supported(arena, x, y) {
                supported += 1;
            }
        }
    }

    if occupied == 0 {
        return 100;
    }
    // Round half up, in integers.
    ((supported * 200 + occupied) / (occupied * 2)) as u8
}

/// Every unsupported occupied cell, row-major (top row first).
pub fn unstable_cells(arena: &Arena) -> Vec<LooseCell> {
    let mut out = Vec::new();
    for (y, row) in arena.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell != EMPTY && !is_supported(arena, x, y) {
                out.push(LooseCell { x, y, value: *cell });
            }
        }
    }
    out
}

/// One topple pass in place. Returns how many cells were lifted and dropped.
///
/// Cells drop in scan order (top row first). Each falls only while the cell below is empty, so
/// loose cells from the same column stack up and the number of occupied cells never changes.
pub fn topple(arena: &mut Arena) -> usize {
    let loose = unstable_cells(arena);
    if loose.is_empty() {
        return 0;
    }

    for cell in &loose {
        arena.set(cell.x as i32, cell.y as i32, EMPTY);
    }

    let height = arena.height() as i32;
    for cell in &loose {
        let x = cell.x as i32;
        let mut y = cell.y as i32;
        while y + 1 < height && !arena.is_occupied(x, y + 1) {
            y += 1;
        }
        arena.set(x, y, cell.value);
    }

    loose.len()
}

/// Single topple pass on a copy of `arena`.
pub fn simulate_fall(arena: &Arena) -> Arena {
    let mut next = arena.clone();
    topple(&mut next);
    next
}

/// Topple until no unsupported cell remains. Returns the settled arena and the number of
/// passes that changed something.
///
/// Every pass moves at least one cell strictly down and none up, so this terminates.
pub fn settle(arena: &Arena) -> (Arena, usize) {
    let mut next = arena.clone();
    let mut passes = 0;
    while topple(&mut next) > 0 {
        passes += 1;
    }
    (next, passes)
}
