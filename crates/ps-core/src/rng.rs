//! Deterministic simulation RNG.
//!
//! The whole scene runs on one thread, so a single seeded `SmallRng` drives
//! every random draw (spawn offsets, service times).  The same seed and the
//! same sequence of calls always reproduce the same run.

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Scene-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw one value from `dist`.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.0)
    }
}
