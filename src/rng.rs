//! # RandomNumberGenerator
//!
//! Every randomized choice in the crate (random restarts, neighbor picks,
//! Metropolis acceptance, puzzle scrambles) draws from a
//! `RandomNumberGenerator` supplied by the caller. Seeding it with
//! [`RandomNumberGenerator::from_seed`] makes a run fully reproducible.
//!
//! ## Example
//!
//! ```rust
//! use searchlab::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.gen_range(0..100), b.gen_range(0..100));
//! assert_eq!(a.distinct_indices(9, 2), b.distinct_indices(9, 2));
//! ```

use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng,
};

/// A wrapper around the `rand` crate's `StdRng` exposing the draws the
/// search algorithms need.
#[derive(Debug, Clone)]
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
    /// Two generators built from the same seed produce the same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A single draw from `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// A fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Samples a value from `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty, like [`rand::Rng::gen_range`].
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Picks one element of `items`, or `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Shuffles `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Draws `amount` distinct indices from `0..length`, in random order.
    ///
    /// # Panics
    ///
    /// Panics if `amount > length`.
    pub fn distinct_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
