//! Monte Carlo engine — trajectory simulation, grid sweep, risk profile.

pub mod profile;
pub mod stats;
pub mod sweep;
pub mod trajectory;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use profile::{equity_samples, histogram, HistogramBucket, RiskProfile};
pub use sweep::{sweep, sweep_with_mode, SweepMode, SweepResults};
pub use trajectory::simulate_month;

// ---------------------------------------------------------------------------
// Random source
// ---------------------------------------------------------------------------

/// A sequential stream of uniform draws in [0, 1).
///
/// Passed explicitly into every simulation call; the order in which draws
/// are consumed is part of the reproducibility contract.
#[cfg_attr(test, mockall::automock)]
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Seedable uniform source backed by `StdRng`.
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
