//! Pancake stacks and their scrambler.

use std::fmt;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use solvebench::Randomizer;

/// Flips the top `n` pancakes of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip(pub usize);

/// A stack of distinct pancakes, listed top to bottom.
///
/// Pancake sizes are `0..len`. The stack is solved when the sizes ascend
/// from the top, so the largest pancake rests on the plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PancakeStack {
    cakes: Vec<u8>,
}

impl PancakeStack {
    /// Creates a solved stack of `len` pancakes.
    pub fn sorted(len: usize) -> Self {
        Self {
            cakes: (0..len).map(|size| size as u8).collect(),
        }
    }

    /// Creates a stack from explicit sizes, or `None` if they are not a
    /// permutation of `0..len`.
    pub fn from_sizes(cakes: Vec<u8>) -> Option<Self> {
        let mut seen = vec![false; cakes.len()];
        for &size in &cakes {
            let slot = seen.get_mut(size as usize)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(Self { cakes })
    }

    pub fn len(&self) -> usize {
        self.cakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cakes.is_empty()
    }

    pub fn sizes(&self) -> &[u8] {
        &self.cakes
    }

    pub fn is_solved(&self) -> bool {
        self.cakes.iter().enumerate().all(|(i, &size)| size as usize == i)
    }

    /// Reverses the top `flip.0` pancakes. Flips deeper than the stack
    /// turn the whole stack over.
    pub fn flip(&mut self, flip: Flip) {
        let depth = flip.0.min(self.cakes.len());
        self.cakes[..depth].reverse();
    }

    pub fn apply(&mut self, flips: &[Flip]) {
        for &flip in flips {
            self.flip(flip);
        }
    }

    /// Number of adjacent pairs, counting the plate as a pancake of size
    /// `len`, whose sizes are not consecutive.
    ///
    /// Every flip fixes at most one gap, so this never overestimates the
    /// number of flips left. It is zero exactly when the stack is solved.
    pub fn gap_count(&self) -> u32 {
        let plate = self.cakes.len() as i16;
        let below = self.cakes.iter().skip(1).map(|&s| s as i16).chain([plate]);
        self.cakes
            .iter()
            .zip(below)
            .filter(|&(&above, below)| (above as i16 - below).abs() != 1)
            .count() as u32
    }

    /// Position of the pancake with the given size.
    pub fn position(&self, size: u8) -> Option<usize> {
        self.cakes.iter().position(|&s| s == size)
    }
}

impl fmt::Display for PancakeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, size) in self.cakes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{size}")?;
        }
        write!(f, "]")
    }
}

/// Produces uniformly shuffled stacks from a seeded ChaCha stream.
#[derive(Debug, Clone)]
pub struct ScrambledStacks {
    rng: ChaCha8Rng,
    stack_size: usize,
}

impl ScrambledStacks {
    pub fn new(stack_size: usize, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            stack_size,
        }
    }

    pub fn stack_size(&self) -> usize {
        self.stack_size
    }
}

impl Randomizer<PancakeStack> for ScrambledStacks {
    fn random_state(&mut self) -> PancakeStack {
        let mut stack = PancakeStack::sorted(self.stack_size);
        stack.cakes.shuffle(&mut self.rng);
        stack
    }
}
