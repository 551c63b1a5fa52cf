//! Leaf dimension - a directly specified basic value with plus/minus tolerances

use rand::RngCore;

use crate::core::dimension::{Dimension, DimensionExt};
use crate::core::error::DimensionError;
use crate::core::sampling::Sampling;

/// A dimension given explicitly by its basic value and two tolerance magnitudes
///
/// Immutable once built. Tolerances are stored as non-negative magnitudes;
/// direction is carried by which field they live in, never by sign.
#[derive(Debug, Clone)]
pub struct LeafDimension {
    basic: f64,
    upper_tol: f64,
    lower_tol: f64,
    sampling: Sampling,
}

impl LeafDimension {
    /// Create a leaf sampled from the default gaussian (midpoint, tolerance / 8)
    pub fn new(basic: f64, upper_tol: f64, lower_tol: f64) -> Result<Self, DimensionError> {
        Self::with_sampling(basic, upper_tol, lower_tol, Sampling::default())
    }

    /// Create a leaf with an explicit sampling strategy
    pub fn with_sampling(
        basic: f64,
        upper_tol: f64,
        lower_tol: f64,
        sampling: Sampling,
    ) -> Result<Self, DimensionError> {
        check_finite("basic", basic)?;
        check_finite("upper_tol", upper_tol)?;
        check_finite("lower_tol", lower_tol)?;

        if basic < 0.0 {
            return Err(DimensionError::NegativeBasic(basic));
        }
        if upper_tol < 0.0 {
            return Err(DimensionError::NegativeUpperTol(upper_tol));
        }
        if lower_tol < 0.0 {
            return Err(DimensionError::NegativeLowerTol(lower_tol));
        }

        tracing::debug!(basic, upper_tol, lower_tol, ?sampling, "created leaf dimension");

        Ok(Self {
            basic,
            upper_tol,
            lower_tol,
            sampling,
        })
    }

    /// Create a leaf whose draws come from `sample_fn`
    pub fn with_sample_fn<F>(
        basic: f64,
        upper_tol: f64,
        lower_tol: f64,
        sample_fn: F,
    ) -> Result<Self, DimensionError>
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Self::with_sampling(basic, upper_tol, lower_tol, Sampling::custom(sample_fn))
    }

    /// Symmetric ± tolerance shorthand
    pub fn symmetric(basic: f64, tol: f64) -> Result<Self, DimensionError> {
        Self::new(basic, tol, tol)
    }

    /// The sampling strategy in use
    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// Standard deviation of the default gaussian, `None` for other shapes
    pub fn sigma(&self) -> Option<f64> {
        self.sampling.sigma(self.tolerance())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), DimensionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DimensionError::NotFinite { field, value })
    }
}

impl Dimension for LeafDimension {
    fn basic(&self) -> f64 {
        self.basic
    }

    fn upper_tol(&self) -> f64 {
        self.upper_tol
    }

    fn lower_tol(&self) -> f64 {
        self.lower_tol
    }

    fn upper_limit(&self) -> f64 {
        self.basic + self.upper_tol
    }

    fn lower_limit(&self) -> f64 {
        self.basic - self.lower_tol
    }

    fn midpoint(&self) -> f64 {
        self.lower_limit() + (self.upper_tol + self.lower_tol) / 2.0
    }

    fn sample_with(&self, rng: &mut dyn RngCore) -> f64 {
        self.sampling.draw(rng, self)
    }
}
