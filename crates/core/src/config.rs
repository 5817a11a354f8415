//! Session configuration

use std::time::{SystemTime, UNIX_EPOCH};

use crate::rng::Randomizer;
use crate::types::{ARENA_HEIGHT, ARENA_WIDTH, MAX_ARENA_EDGE, MIN_ARENA_EDGE};

/// Parameters fixed for the lifetime of a [`Session`](crate::session::Session)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub randomizer: Randomizer,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            seed: 1,
            randomizer: Randomizer::Uniform,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// - `TERA_ARENA_WIDTH`, `TERA_ARENA_HEIGHT`: arena size (clamped to `4..=200`)
    /// - `TERA_SEED`: piece sequence seed (wall clock when unset)
    /// - `TERA_RANDOMIZER`: `uniform`, `bag` or `scripted:<letters>`
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = lookup("TERA_ARENA_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width)
            .clamp(MIN_ARENA_EDGE, MAX_ARENA_EDGE);

        let height = lookup("TERA_ARENA_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height)
            .clamp(MIN_ARENA_EDGE, MAX_ARENA_EDGE);

        let seed = lookup("TERA_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let randomizer = lookup("TERA_RANDOMIZER")
            .and_then(|s| Randomizer::parse(&s))
            .unwrap_or(defaults.randomizer);

        Self {
            width,
            height,
            seed,
            randomizer,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width.clamp(MIN_ARENA_EDGE, MAX_ARENA_EDGE);
        self.height = height.clamp(MIN_ARENA_EDGE, MAX_ARENA_EDGE);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
