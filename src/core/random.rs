//! Injected randomness
//!
//! Every random decision in the engine goes through [`RandomSource`], so a
//! test can replay an exact draw sequence with [`ScriptedRandom`] instead of
//! relying on a seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{CountRange, FloatRange};

/// Largest f32 strictly below 1.0
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Source of uniform draws. Derived helpers are built on `next_f32` only,
/// so one scripted sequence drives every decision.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn next_f32(&mut self) -> f32;

    /// Uniform draw within an inclusive float range
    fn next_in_range(&mut self, range: FloatRange) -> f32 {
        let r = range.normalized();
        if r.max <= r.min {
            return r.min;
        }
        r.min + (r.max - r.min) * self.next_f32()
    }

    /// Uniform integer within an inclusive count range
    fn next_count(&mut self, range: CountRange) -> u32 {
        let r = range.normalized();
        if r.max == r.min {
            return r.min;
        }
        let span = (r.max - r.min) as u64 + 1;
        let offset = ((self.next_f32() as f64) * span as f64) as u64;
        r.min + offset.min(span - 1) as u32
    }

    /// Uniform index into a collection of `len` elements. `len` of zero yields 0.
    fn next_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }

    /// Bernoulli trial. Certain outcomes (p <= 0 or p >= 1) consume no draw.
    fn chance(&mut self, probability: f32) -> bool {
        if probability >= 1.0 {
            true
        } else if probability <= 0.0 || probability.is_nan() {
            false
        } else {
            self.next_f32() < probability
        }
    }
}

/// Adapter that turns any `rand::Rng` into a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ChaCha8Rng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f32(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

/// Replays a fixed sequence of draws, wrapping around when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(draws: impl Into<Vec<f32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far
    pub fn draws_taken(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(0.0, BELOW_ONE)
    }
}
