//! Random number sources for scatter and rotation
//!
//! The tip mover never reaches for an ambient generator. Callers inject a
//! source so that jittered strokes can be replayed in tests.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::{StdRng, ThreadRng};

/// Source of uniformly distributed values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl RandomSource for ThreadRng {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded generator for reproducible jitter
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator seeded from the operating system
pub fn from_entropy() -> StdRng {
    StdRng::from_os_rng()
}

/// Cycles through a fixed list of values
///
/// Values are clamped into `[0, 1)`. An empty list always yields 0.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
