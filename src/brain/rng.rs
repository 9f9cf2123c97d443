//! Random sources injected into the brain
//!
//! The engine never touches a process-wide generator. Every decision draws
//! from a `BrainRng` owned by the caller (or created for that one call), so
//! concurrent battles with different seeds cannot disturb each other.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness consumed by a single decision
pub trait BrainRng {
    /// Restart the sequence from `seed`
    fn reseed(&mut self, seed: u64);

    /// Next value in `[0, 1)`
    fn random(&mut self) -> f64;

    /// Next value in `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.random()
    }

    /// Pick an index with probability proportional to its weight
    ///
    /// Returns None when no weight is positive.
    fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut roll = self.random() * total;
        let mut last_positive = None;
        for (i, w) in weights.iter().enumerate() {
            if *w <= 0.0 {
                continue;
            }
            if roll < *w {
                return Some(i);
            }
            roll -= *w;
            last_positive = Some(i);
        }
        // Float drift at the top end lands on the last eligible entry
        last_positive
    }
}

impl<R: BrainRng + ?Sized> BrainRng for &mut R {
    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed)
    }

    fn random(&mut self) -> f64 {
        (**self).random()
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }

    fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        (**self).weighted_choice(weights)
    }
}

/// ChaCha-backed generator; reproducible across platforms for a given seed
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl BrainRng for SeededRng {
    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then repeats the final value
///
/// Used to pin exact noise in tests and to replay recorded battles.
/// Reseeding rewinds to the first draw.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Every draw returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl BrainRng for ScriptedRng {
    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
    }

    fn random(&mut self) -> f64 {
        let value = match self.values.get(self.cursor) {
            Some(v) => *v,
            None => self.values.last().copied().unwrap_or(0.0),
        };
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
