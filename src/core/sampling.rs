//! Sampling strategies for Monte Carlo draws
//!
//! A leaf dimension owns one [`Sampling`] strategy. The built-in shapes are
//! centered within the tolerance band; `Custom` hands control to a caller
//! supplied closure.

use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::core::dimension::{Dimension, DimensionExt};
use crate::core::error::DimensionError;

/// Tolerance band width expressed in standard deviations (band = ±4σ)
pub const DEFAULT_SIGMA_LEVEL: f64 = 8.0;

/// Zero-argument sampling closure
pub type SampleFn = Arc<dyn Fn() -> f64 + Send + Sync>;

/// Statistical distribution shape, as named in definition files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Distribution {
    /// Normal (Gaussian) distribution
    #[default]
    Normal,
    /// Uniform distribution
    Uniform,
    /// Triangular distribution
    Triangular,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Normal => write!(f, "normal"),
            Distribution::Uniform => write!(f, "uniform"),
            Distribution::Triangular => write!(f, "triangular"),
        }
    }
}

/// How a leaf dimension produces a random draw
#[derive(Clone)]
pub enum Sampling {
    /// Gaussian centered on the midpoint with σ = tolerance / sigma_level
    Normal { sigma_level: f64 },
    /// Uniform across the limits
    Uniform,
    /// Symmetric triangular across the limits, mode at the midpoint
    Triangular,
    /// Caller supplied draw, returned unchecked
    Custom(SampleFn),
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling::Normal {
            sigma_level: DEFAULT_SIGMA_LEVEL,
        }
    }
}

impl fmt::Debug for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sampling::Normal { sigma_level } => f
                .debug_struct("Normal")
                .field("sigma_level", sigma_level)
                .finish(),
            Sampling::Uniform => write!(f, "Uniform"),
            Sampling::Triangular => write!(f, "Triangular"),
            Sampling::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl From<Distribution> for Sampling {
    fn from(distribution: Distribution) -> Self {
        match distribution {
            Distribution::Normal => Sampling::default(),
            Distribution::Uniform => Sampling::Uniform,
            Distribution::Triangular => Sampling::Triangular,
        }
    }
}

impl Sampling {
    /// Gaussian with a custom band-to-sigma ratio
    pub fn normal(sigma_level: f64) -> Result<Self, DimensionError> {
        if !sigma_level.is_finite() || sigma_level <= 0.0 {
            return Err(DimensionError::InvalidSigmaLevel(sigma_level));
        }
        Ok(Sampling::Normal { sigma_level })
    }

    /// Wrap an arbitrary closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Sampling::Custom(Arc::new(f))
    }

    /// Shape name, `None` for custom closures
    pub fn distribution(&self) -> Option<Distribution> {
        match self {
            Sampling::Normal { .. } => Some(Distribution::Normal),
            Sampling::Uniform => Some(Distribution::Uniform),
            Sampling::Triangular => Some(Distribution::Triangular),
            Sampling::Custom(_) => None,
        }
    }

    /// Standard deviation of a normal draw over a band of width `tolerance`
    pub fn sigma(&self, tolerance: f64) -> Option<f64> {
        match self {
            Sampling::Normal { sigma_level } => Some(normal_sigma(tolerance, *sigma_level)),
            _ => None,
        }
    }

    /// Draw one value within `dim`'s tolerance band
    pub fn draw<D: Dimension + ?Sized>(&self, rng: &mut dyn RngCore, dim: &D) -> f64 {
        let tolerance = dim.tolerance();
        let midpoint = dim.midpoint();
        match self {
            Sampling::Custom(f) => f(),
            _ if tolerance <= 0.0 => midpoint,
            Sampling::Normal { sigma_level } => {
                sample_normal(rng, midpoint, normal_sigma(tolerance, *sigma_level))
            }
            Sampling::Uniform => sample_uniform(rng, dim.lower_limit(), dim.upper_limit()),
            Sampling::Triangular => {
                sample_triangular(rng, dim.lower_limit(), midpoint, dim.upper_limit())
            }
        }
    }
}

fn normal_sigma(tolerance: f64, sigma_level: f64) -> f64 {
    tolerance / sigma_level
}

/// Gaussian draw via the Box-Muller transform
pub fn sample_normal(rng: &mut dyn RngCore, mean: f64, stddev: f64) -> f64 {
    if stddev <= 0.0 {
        return mean;
    }
    // u1 in (0, 1] keeps ln finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0_f64 * u1.ln()).sqrt() * (2.0_f64 * std::f64::consts::PI * u2).cos();
    mean + stddev * z
}

/// Uniform draw over `[min, max]`
pub fn sample_uniform(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Triangular draw via inverse transform
pub fn sample_triangular(rng: &mut dyn RngCore, min: f64, mode: f64, max: f64) -> f64 {
    if max <= min {
        return mode;
    }
    let u: f64 = rng.random();
    let fc = (mode - min) / (max - min);
    if u < fc {
        min + (u * (max - min) * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * (max - min) * (max - mode)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::LeafDimension;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mean_and_std(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn test_normal_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..50_000)
            .map(|_| sample_normal(&mut rng, 2.0, 0.5))
            .collect();
        let (mean, std) = mean_and_std(&draws);
        assert!((mean - 2.0).abs() < 0.02, "mean = {}", mean);
        assert!((std - 0.5).abs() < 0.02, "std = {}", std);
    }

    #[test]
    fn test_normal_zero_stddev_returns_mean() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_normal(&mut rng, 3.5, 0.0), 3.5);
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let v = sample_uniform(&mut rng, 9.4, 10.5);
            assert!((9.4..=10.5).contains(&v));
        }
    }

    #[test]
    fn test_triangular_stays_in_range_and_centers() {
        let mut rng = StdRng::seed_from_u64(11);
        let draws: Vec<f64> = (0..20_000)
            .map(|_| sample_triangular(&mut rng, 0.0, 1.0, 2.0))
            .collect();
        assert!(draws.iter().all(|v| (0.0..=2.0).contains(v)));
        let (mean, _) = mean_and_std(&draws);
        assert!((mean - 1.0).abs() < 0.02, "mean = {}", mean);
    }

    #[test]
    fn test_zero_band_draws_center() {
        let mut rng = StdRng::seed_from_u64(5);
        let dim = LeafDimension::new(4.0, 0.0, 0.0).unwrap();
        for sampling in [Sampling::default(), Sampling::Uniform, Sampling::Triangular] {
            assert_eq!(sampling.draw(&mut rng, &dim), 4.0);
        }
    }

    #[test]
    fn test_custom_ignores_band() {
        let mut rng = StdRng::seed_from_u64(5);
        let dim = LeafDimension::new(0.5, 0.5, 0.5).unwrap();
        let sampling = Sampling::custom(|| 42.0);
        assert_eq!(sampling.draw(&mut rng, &dim), 42.0);
        assert_eq!(sampling.distribution(), None);
        assert_eq!(sampling.sigma(1.0), None);
    }

    #[test]
    fn test_normal_draw_uses_sigma_of_tolerance() {
        let dim = LeafDimension::new(10.0, 0.5, 0.3).unwrap();
        let sampling = Sampling::normal(6.0).unwrap();
        let sigma = sampling.sigma(dim.tolerance()).unwrap();

        let mut a = StdRng::seed_from_u64(21);
        let mut b = StdRng::seed_from_u64(21);
        for _ in 0..20 {
            assert_eq!(
                sampling.draw(&mut a, &dim),
                sample_normal(&mut b, dim.midpoint(), sigma)
            );
        }
    }

    #[test]
    fn test_sigma_level_validation() {
        assert!(Sampling::normal(6.0).is_ok());
        assert_eq!(
            Sampling::normal(0.0).unwrap_err(),
            DimensionError::InvalidSigmaLevel(0.0)
        );
        assert!(Sampling::normal(f64::NAN).is_err());
    }

    #[test]
    fn test_distribution_into_sampling() {
        let sampling: Sampling = Distribution::Normal.into();
        assert!(matches!(
            sampling,
            Sampling::Normal { sigma_level } if sigma_level == DEFAULT_SIGMA_LEVEL
        ));
        let sampling: Sampling = Distribution::Triangular.into();
        assert_eq!(sampling.distribution(), Some(Distribution::Triangular));
    }
}
