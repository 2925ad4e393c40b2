//! RNG module - seeded piece selection
//!
//! Three ways of choosing the next piece:
//! - `Uniform`: every draw picks one of the seven kinds with equal chance.
//! - `Bag7`: each bag holds one of each kind, shuffled; drawn until empty.
//! - `Sequence`: a fixed list, cycled. Handy for scripted boards and tests.
//!
//! Also provides a simple LCG so a seed reproduces a run.

use crate::config::ConfigError;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits have short periods; take the high half.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Piece selection rule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag7,
    Sequence(Vec<PieceKind>),
}

impl Randomizer {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Randomizer::Sequence(kinds) if kinds.is_empty() => Err(ConfigError::EmptySequence),
            _ => Ok(()),
        }
    }
}

/// Endless source of piece kinds for one session
#[derive(Debug, Clone)]
pub struct PieceQueue {
    randomizer: Randomizer,
    /// Current bag of pieces (Bag7 only)
    bag: [PieceKind; 7],
    /// Index into current bag, or into the fixed sequence
    index: usize,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32, randomizer: Randomizer) -> Self {
        let mut queue = Self {
            randomizer,
            bag: PieceKind::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
        };
        if queue.randomizer == Randomizer::Bag7 {
            queue.rng.shuffle(&mut queue.bag);
        }
        queue
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        match &self.randomizer {
            Randomizer::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            Randomizer::Bag7 => {
                if self.index >= self.bag.len() {
                    self.bag = PieceKind::ALL;
                    self.rng.shuffle(&mut self.bag);
                    self.index = 0;
                }
                let piece = self.bag[self.index];
                self.index += 1;
                piece
            }
            Randomizer::Sequence(kinds) => {
                // Validated non-empty at session construction.
                let piece = kinds[self.index % kinds.len()];
                self.index = (self.index + 1) % kinds.len();
                piece
            }
        }
    }

    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }
}
