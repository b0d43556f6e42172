//! `rand`-backed random source for live sessions.

use grotto_core::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded [`StdRng`] exposed as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = SeededRandom::new(9);
        let mut b = SeededRandom::new(9);
        for _ in 0..100 {
            let draw = a.next_f64();
            assert_eq!(draw, b.next_f64());
            assert!((0.0..1.0).contains(&draw));
        }
    }
}
