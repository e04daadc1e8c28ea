//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The whole run draws from one `SimRng` seeded from `PortConfig::seed`.
//! Because event dispatch is strictly ordered by (tick, priority, FIFO),
//! the sequence of draws and therefore every perturbed sailing and handling
//! duration is reproducible for a given seed.  Components that want an
//! independent stream (the arrival generator) take a `child` so that adding
//! draws in one place does not shift the other.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.  Single-threaded by construction: the event loop
/// is the only caller.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Draw from `Normal(mean, sigma)`, round to the nearest tick, and clamp
    /// to at least `floor`.
    ///
    /// A non-finite or negative `sigma` degrades to the deterministic `mean`.
    pub fn normal_ticks(&mut self, mean: f64, sigma: f64, floor: u64) -> u64 {
        let drawn = match Normal::new(mean, sigma) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(_) => mean,
        };
        round_to_ticks(drawn).max(floor)
    }

    /// Draw from an exponential distribution with the given `mean` and round
    /// to the nearest tick.  A non-positive mean yields 0.
    pub fn exponential_ticks(&mut self, mean: f64) -> u64 {
        if mean <= 0.0 {
            return 0;
        }
        match Exp::new(1.0 / mean) {
            Ok(dist) => round_to_ticks(dist.sample(&mut self.0)),
            Err(_) => round_to_ticks(mean),
        }
    }
}

fn round_to_ticks(x: f64) -> u64 {
    if x.is_finite() && x > 0.0 { x.round() as u64 } else { 0 }
}
