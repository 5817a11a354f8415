//! RNG module - piece kind selection
//!
//! The factory never chooses kinds itself; a [`PieceGenerator`] does, using one of
//! three strategies:
//!
//! - **Uniform**: every draw is an independent uniform pick from the 7 kinds
//! - **Bag**: 7-bag randomizer (each bag holds one of each kind, shuffled)
//! - **Scripted**: cycles through a fixed sequence (replays and tests)
//!
//! All strategies are driven by a seeded LCG, so a seed fully determines a game.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Strategy used to pick the next piece kind
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag,
    /// Cycles through the given kinds; an empty list behaves like `Uniform`.
    Scripted(Vec<PieceKind>),
}

impl Randomizer {
    /// Parse `uniform`, `bag` or `scripted:<letters>` (e.g. `scripted:IOT`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let lower = s.to_lowercase();
        match lower.as_str() {
            "uniform" | "random" => return Some(Randomizer::Uniform),
            "bag" | "7bag" | "7-bag" => return Some(Randomizer::Bag),
            _ => {}
        }
        let letters = lower.strip_prefix("scripted:")?;
        let kinds = letters
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(PieceKind::from_char)
            .collect::<Option<Vec<_>>>()?;
        if kinds.is_empty() {
            return None;
        }
        Some(Randomizer::Scripted(kinds))
    }
}

/// Draws piece kinds according to a [`Randomizer`]
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    randomizer: Randomizer,
    bag: [PieceKind; 7],
    /// Index into `bag` (Bag) or into the script (Scripted)
    cursor: usize,
}

impl PieceGenerator {
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        let mut generator = Self {
            rng: SimpleRng::new(seed),
            randomizer,
            bag: PieceKind::ALL,
            cursor: 0,
        };
        if generator.randomizer == Randomizer::Bag {
            generator.refill_bag();
        }
        generator
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Draw the next kind
    pub fn next_kind(&mut self) -> PieceKind {
        match &self.randomizer {
            Randomizer::Uniform => self.uniform(),
            Randomizer::Bag => {
                if self.cursor >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.cursor];
                self.cursor += 1;
                kind
            }
            Randomizer::Scripted(script) if !script.is_empty() => {
                let kind = script[self.cursor % script.len()];
                self.cursor = (self.cursor + 1) % script.len();
                kind
            }
            Randomizer::Scripted(_) => self.uniform(),
        }
    }

    fn uniform(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }

    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }

    /// Current RNG state (restarting from it replays the remaining sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, Randomizer::Uniform)
    }
}
