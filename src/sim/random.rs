//! Randomness used by the flip engine
//!
//! The engine only ever asks for a fair coin and a small inclusive range, so
//! it depends on this narrow trait instead of a concrete RNG. Tests plug in
//! a scripted source; the app uses a seeded PCG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of randomness for outcome and spin selection
pub trait RandomSource {
    /// Fair coin: `true` and `false` each with probability 0.5
    fn uniform_bool(&mut self) -> bool;

    /// Uniform integer in `min..=max`
    fn random_int_in_range(&mut self, min: u32, max: u32) -> u32;
}

/// Seeded PCG random source (reproducible for a given seed)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn random_int_in_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        assert_eq!(a.seed(), 42);

        for _ in 0..64 {
            assert_eq!(a.uniform_bool(), b.uniform_bool());
            assert_eq!(a.random_int_in_range(5, 9), b.random_int_in_range(5, 9));
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut rng = SeededRandom::new(7);
        let mut seen = [false; 5];

        for _ in 0..1_000 {
            let n = rng.random_int_in_range(5, 9);
            assert!((5..=9).contains(&n));
            seen[(n - 5) as usize] = true;
        }

        assert!(seen.iter().all(|&s| s), "every value in 5..=9 should appear");
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.random_int_in_range(3, 3), 3);
        assert_eq!(rng.random_int_in_range(9, 5), 9);
    }

    #[test]
    fn test_uniform_bool_is_fair() {
        let mut rng = SeededRandom::new(2024);
        let trials = 10_000;
        let heads = (0..trials).filter(|_| rng.uniform_bool()).count() as f64;
        let tails = trials as f64 - heads;
        let expected = trials as f64 / 2.0;

        // Chi-square with 1 degree of freedom, p = 0.001
        let chi2 = (heads - expected).powi(2) / expected + (tails - expected).powi(2) / expected;
        assert!(chi2 < 10.83, "chi-square {chi2} too large");
    }
}
