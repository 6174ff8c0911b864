//! Pluggable random sources for obstacle scatter

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of integers used while scattering obstacles
pub trait RandomSource {
    /// Return an integer in `[low, high]` (both inclusive)
    fn next_int(&mut self, low: i32, high: i32) -> i32;
}

/// Adapter exposing any `rand::Rng` as a [`RandomSource`]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for tests and seeded sessions
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_int(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Values are clamped into the requested range so a script written for one
/// grid never produces out-of-range coordinates on another.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<i32>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<i32>) -> Self {
        ScriptedSource { values, next: 0 }
    }

    /// Script that scatters obstacles on the given `(row, col)` cells in order
    pub fn from_cells(cells: &[(i32, i32)]) -> Self {
        Self::new(cells.iter().flat_map(|&(row, col)| [row, col]).collect())
    }
}

impl RandomSource for ScriptedSource {
    fn next_int(&mut self, low: i32, high: i32) -> i32 {
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(low, high.max(low))
    }
}
