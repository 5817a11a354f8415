//! Session module - the game state machine
//!
//! A [`Session`] owns one arena, the falling piece, the lookahead piece, the stats and the
//! drop clock. Hosts drive it with commands (`move_left`, `rotate`, `hard_drop`, ...) and one
//! [`Session::tick`] per frame, then read a [`GameSnapshot`] to render.
//!
//! Phases:
//!
//! ```text
//! Idle --start--> Running <--toggle_pause--> Paused
//!                    |
//!                    +--spawn blocked--> GameOver
//! any --reset--> Idle
//! ```
//!
//! Gameplay commands are no-ops outside `Running`. Rejections are reported as `false`, never
//! as errors.

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::pieces::{create_piece, resolve_rotation, spawn_position, Shape};
use crate::rng::PieceGenerator;
use crate::scoring::{apply_line_clear, drop_interval_ms, Stats};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::stability::{compute_stability, topple};
use crate::types::{GameAction, Position, RotationDirection, SessionEvent, SessionPhase};

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub position: Position,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            shape: value.shape.clone(),
            position: value.position,
        }
    }
}

/// One game session
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    arena: Arena,
    generator: PieceGenerator,
    active: Option<ActivePiece>,
    next: Option<Shape>,
    stats: Stats,
    phase: SessionPhase,
    /// Gameplay time; does not advance while paused
    elapsed_ms: u64,
    /// Time since the last automatic (or manual soft) drop
    drop_accumulator_ms: u32,
    stability: Option<u8>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create an idle session
    pub fn new(config: GameConfig) -> Self {
        Self {
            arena: Arena::new(config.width, config.height),
            generator: PieceGenerator::new(config.seed, config.randomizer.clone()),
            config,
            active: None,
            next: None,
            stats: Stats::default(),
            phase: SessionPhase::Idle,
            elapsed_ms: 0,
            drop_accumulator_ms: 0,
            stability: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Replace the arena contents (puzzles, replays, tests).
    ///
    /// Rejected unless the dimensions match the configured arena.
    pub fn load_arena(&mut self, arena: Arena) -> bool {
        if arena.width() != self.arena.width() || arena.height() != self.arena.height() {
            return false;
        }
        self.arena = arena;
        true
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&Shape> {
        self.next.as_ref()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn lines(&self) -> u32 {
        self.stats.lines
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Last computed stability percentage
    pub fn stability(&self) -> Option<u8> {
        self.stability
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.stats.level)
    }

    /// Drain pending events, oldest first
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Running with a fresh arena, fresh stats and two new pieces.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }

        self.arena.clear();
        self.stats = Stats::default();
        self.elapsed_ms = 0;
        self.drop_accumulator_ms = 0;
        self.stability = None;
        self.active = None;
        self.next = None;

        self.phase = SessionPhase::Running;
        self.events.push(SessionEvent::Started);
        self.spawn_next();
        true
    }

    /// Discard the session state and return to Idle. The piece sequence continues.
    pub fn reset(&mut self) {
        self.arena.clear();
        self.stats = Stats::default();
        self.elapsed_ms = 0;
        self.drop_accumulator_ms = 0;
        self.stability = None;
        self.active = None;
        self.next = None;
        self.phase = SessionPhase::Idle;
    }

    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Paused;
        self.events.push(SessionEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            return false;
        }
        self.phase = SessionPhase::Running;
        self.events.push(SessionEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            SessionPhase::Running => self.pause(),
            SessionPhase::Paused => self.resume(),
            _ => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i32) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let target = active.position.offset(dx, 0);
        if self.arena.collides(&active.shape, target) {
            return false;
        }
        active.position = target;
        true
    }

    /// Move down one row, or lock when blocked. Resets the drop clock either way.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() || self.active.is_none() {
            return false;
        }
        self.step_down();
        self.drop_accumulator_ms = 0;
        true
    }

    /// Move down until blocked, then lock immediately.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        while !self
            .arena
            .collides(&active.shape, active.position.offset(0, 1))
        {
            active.position.y += 1;
        }
        self.lock_active();
        self.drop_accumulator_ms = 0;
        true
    }

    /// Rotate with wall kicks. Returns false when no kick fits (piece unchanged).
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        match resolve_rotation(&self.arena, &active.shape, active.position, direction) {
            Some((shape, position)) => {
                active.shape = shape;
                active.position = position;
                true
            }
            None => false,
        }
    }

    /// Advance gameplay time. Returns true when an automatic drop step happened.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms as u64);
        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(delta_ms);

        if self.drop_accumulator_ms < self.drop_interval_ms() {
            return false;
        }

        self.drop_accumulator_ms = 0;
        if self.active.is_none() {
            return false;
        }
        self.step_down();
        true
    }

    /// Apply a host command
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Restart => self.restart(),
            GameAction::Simulate => self.simulate_stability().is_some(),
        }
    }

    /// Measure stability and remember it for the HUD.
    pub fn compute_stability(&mut self) -> u8 {
        let pct = compute_stability(&self.arena);
        self.stability = Some(pct);
        self.events.push(SessionEvent::StabilityComputed(pct));
        pct
    }

    /// Measure stability and, below 100%, topple loose cells once.
    ///
    /// Only while Running or Paused. Returns the measured percentage.
    pub fn simulate_stability(&mut self) -> Option<u8> {
        if !matches!(self.phase, SessionPhase::Running | SessionPhase::Paused) {
            return None;
        }

        let pct = self.compute_stability();
        if pct < 100 {
            let cells = topple(&mut self.arena);
            self.events.push(SessionEvent::StabilityToppled {
                cells: cells as u32,
            });
        }
        Some(pct)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.arena.width();
        out.height = self.arena.height();
        out.arena.clear();
        out.arena.extend_from_slice(self.arena.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.next = self.next.clone();
        out.stats = self.stats;
        out.phase = self.phase;
        out.elapsed_ms = self.elapsed_ms;
        out.drop_interval_ms = self.drop_interval_ms();
        out.stability = self.stability;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// One row down, locking when blocked
    fn step_down(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let below = active.position.offset(0, 1);
        if self.arena.collides(&active.shape, below) {
            self.lock_active();
        } else {
            active.position = below;
        }
    }

    /// Merge -> sweep -> score -> spawn -> game-over check
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.arena.merge(&active.shape, active.position);

        let rows = self.arena.sweep() as u32;
        if rows > 0 {
            let outcome = apply_line_clear(&mut self.stats, rows);
            self.events.push(SessionEvent::LinesCleared(rows));
            if let Some(level) = outcome.leveled_up {
                self.events.push(SessionEvent::LeveledUp(level));
            }
        }

        self.spawn_next();
    }

    /// Promote the lookahead piece and draw a new one. Enters GameOver when the spawned piece
    /// already overlaps the arena.
    fn spawn_next(&mut self) {
        let shape = match self.next.take() {
            Some(shape) => shape,
            None => create_piece(self.generator.next_kind()),
        };
        self.next = Some(create_piece(self.generator.next_kind()));

        let position = spawn_position(&shape, self.arena.width());
        let blocked = self.arena.collides(&shape, position);
        self.active = Some(ActivePiece { shape, position });

        if blocked {
            self.phase = SessionPhase::GameOver;
            self.events.push(SessionEvent::GameOver {
                final_score: self.stats.score,
            });
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
