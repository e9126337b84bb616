//! Per-instance seeded randomness.
//!
//! Every game owns one [`GameRng`] seeded at construction. There is no
//! shared or thread-local generator, so two instances built from the
//! same seed and fed the same actions produce bit-identical runs.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic generator behind every spawn decision.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Seed a new generator.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.inner.random_bool(0.5)
    }

    /// Uniform in `[0, n)`. Returns 0 without drawing when `n == 0`.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.inner.random_range(0..n)
    }

    /// True with probability `1 / n`.
    pub fn one_in(&mut self, n: u32) -> bool {
        self.below(n) == 0
    }

    /// A uniformly chosen element, or `None` if `items` is empty.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.inner).copied()
    }
}
