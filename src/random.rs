//! Sources of randomness injected into generators.

use std::fmt;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{ Rng, SeedableRng };

/// Produces integers uniformly distributed over `min..=max`.
///
/// Callers guarantee `min <= max`.
pub trait RandomSource: fmt::Debug + Send + Sync {
    fn random_integer(&self, min: i64, max: i64) -> i64;
}

/// Thread-local generator from `rand`, used when nothing is injected.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn random_integer(&self, min: i64, max: i64) -> i64 {
        let mut rng = rand::rng();
        rng.random_range(min..=max)
    }
}

/// Reproducible sequence from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn random_integer(&self, min: i64, max: i64) -> i64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(min..=max)
    }
}

/// Always answers `min`. Only useful for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRandom;

impl RandomSource for NoRandom {
    fn random_integer(&self, min: i64, _max: i64) -> i64 {
        min
    }
}
