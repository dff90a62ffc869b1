//! Injectable random sources.
//!
//! Every probabilistic decision the engine makes (walk steps, probability
//! gates, catalog picks) goes through [`RandomSource::next_f64`], so a
//! [`ScriptedRandom`] can replay an exact sequence in tests.

use crate::error::{KavachError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Next draw, uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64).floor() as usize;
        i.min(len.saturating_sub(1))
    }

    /// Uniform step in `[-magnitude, +magnitude)`.
    fn signed_step(&mut self, magnitude: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * magnitude
    }
}

// ---------------------------------------------------------------------------
// StdRandom
// ---------------------------------------------------------------------------

/// Production source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from the operating system. Fails here rather than on a later tick
    /// if the OS entropy source cannot be read.
    pub fn from_entropy() -> Result<Self> {
        let rng = StdRng::from_rng(OsRng).map_err(|e| KavachError::RandomSource(e.to_string()))?;
        Ok(Self { rng })
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

// ---------------------------------------------------------------------------
// ScriptedRandom
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of draws, cycling back to the start when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<f64>) -> Result<Self> {
        if draws.is_empty() {
            return Err(KavachError::EmptyScript);
        }
        if let Some(bad) = draws.iter().copied().find(|d| !(0.0..1.0).contains(d)) {
            return Err(KavachError::InvalidDraw(bad));
        }
        Ok(Self { draws, cursor: 0 })
    }

    /// A source that returns `value` forever.
    pub fn constant(value: f64) -> Result<Self> {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
