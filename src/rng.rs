//! # RandomNumberGenerator
//!
//! The evolutionary loop itself is fully deterministic. Randomness is only used to
//! generate problem instances (for the `generate` command, benches and tests), so
//! the generator is a thin seedable wrapper around the `rand` crate's `StdRng`.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let weights = rng.fetch_uniform(1, 100, 5);
//!
//! assert_eq!(weights.len(), 5);
//! assert!(weights.iter().all(|w| (1..100).contains(w)));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// A wrapper around the `rand` crate's `StdRng` that draws integers in a range.
#[derive(Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible instances, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `num` integers in `[from, to)`.
    ///
    /// # Panics
    ///
    /// Panics if `from >= to` and `num > 0`, like `Rng::gen_range`.
    pub fn fetch_uniform(&mut self, from: i64, to: i64, num: usize) -> VecDeque<i64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
