//! Multiplicative Gaussian travel-time noise.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Default standard deviation as a fraction of the base travel time.
pub const DEFAULT_RELATIVE_STD_DEV: f64 = 0.10;

/// Per-edge noise model: `max(0, base + N(0, relative_std_dev * base))`.
///
/// The noise is zero-mean, so apart from the clamp at zero the sampled
/// time is unbiased.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use city_dispatch::simulation::NoiseModel;
///
/// let noise = NoiseModel::default();
/// let t = noise.sample_edge_time(10.0, &mut StdRng::seed_from_u64(0));
/// assert!(t >= 0.0);
///
/// let exact = NoiseModel::default().with_relative_std_dev(0.0);
/// assert_eq!(exact.sample_edge_time(10.0, &mut StdRng::seed_from_u64(0)), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    relative_std_dev: f64,
}

impl NoiseModel {
    /// Creates a model with the default relative standard deviation.
    pub fn new() -> Self {
        Self {
            relative_std_dev: DEFAULT_RELATIVE_STD_DEV,
        }
    }

    /// Sets the relative standard deviation. Negative values disable noise.
    pub fn with_relative_std_dev(mut self, relative_std_dev: f64) -> Self {
        self.relative_std_dev = relative_std_dev;
        self
    }

    /// Returns the relative standard deviation.
    pub fn relative_std_dev(&self) -> f64 {
        self.relative_std_dev
    }

    /// Samples a noisy traversal time for an edge with base time `base`.
    ///
    /// Consumes one draw from `rng` unless the standard deviation is zero,
    /// in which case `base` is returned unchanged.
    pub fn sample_edge_time<R: Rng + ?Sized>(&self, base: f64, rng: &mut R) -> f64 {
        let sigma = self.relative_std_dev * base;
        if !sigma.is_finite() || sigma <= 0.0 {
            return base.max(0.0);
        }
        match Normal::new(0.0, sigma) {
            Ok(normal) => (base + normal.sample(rng)).max(0.0),
            Err(_) => base.max(0.0),
        }
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self::new()
    }
}
