//! Dimension trait - common interface for leaf and derived dimensions
//!
//! Every dimension exposes a basic (nominal) value, two non-negative tolerance
//! magnitudes and the limits they produce, plus a stochastic `sample` used for
//! Monte Carlo stack-up simulation.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::error::DimensionError;

/// Shared handle to a dimension; the same leaf may feed several stacks
pub type DimensionRef = Arc<dyn Dimension>;

/// Read-only contract every dimension variant satisfies
///
/// Implementations must keep `lower_limit <= midpoint <= upper_limit`.
/// `Send + Sync` lets stacks sharing constituents be read and sampled from
/// several threads at once.
pub trait Dimension: fmt::Debug + Send + Sync {
    /// Nominal value
    fn basic(&self) -> f64;

    /// Allowed deviation above basic
    fn upper_tol(&self) -> f64;

    /// Allowed deviation below basic
    fn lower_tol(&self) -> f64;

    /// Largest permissible value
    fn upper_limit(&self) -> f64;

    /// Smallest permissible value
    fn lower_limit(&self) -> f64;

    /// Center of the tolerance band (differs from basic when tolerances are asymmetric)
    fn midpoint(&self) -> f64;

    /// Draw one value using the given generator
    fn sample_with(&self, rng: &mut dyn RngCore) -> f64;

    /// Draw one value using the calling thread's generator
    fn sample(&self) -> f64 {
        self.sample_with(&mut rand::rng())
    }
}

/// Properties defined once for every dimension
///
/// Blanket-implemented, so variants cannot override them.
pub trait DimensionExt: Dimension {
    /// Total band width, always `upper_tol + lower_tol`
    fn tolerance(&self) -> f64 {
        self.upper_tol() + self.lower_tol()
    }

    /// `(lower_limit, upper_limit)`
    fn limits(&self) -> (f64, f64) {
        (self.lower_limit(), self.upper_limit())
    }

    /// Fail if either tolerance is negative
    ///
    /// Leaves never fail. Stacks can, when a subtracted constituent's
    /// tolerance outweighs the added side; composition itself allows that.
    fn check_tolerances(&self) -> Result<(), DimensionError> {
        let upper_tol = self.upper_tol();
        let lower_tol = self.lower_tol();
        if upper_tol < 0.0 || lower_tol < 0.0 {
            return Err(DimensionError::NegativeTolerance {
                upper_tol,
                lower_tol,
            });
        }
        Ok(())
    }
}

impl<D: Dimension + ?Sized> DimensionExt for D {}

/// Direction of a contribution in a stack-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Direction {
    /// Adds to the stack
    #[default]
    Positive,
    /// Subtracts from the stack
    Negative,
}

impl Direction {
    /// +1.0 or -1.0
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
        }
    }
}

/// Point-in-time copy of a dimension's read accessors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSnapshot {
    pub basic: f64,
    pub upper_tol: f64,
    pub lower_tol: f64,
    pub upper_limit: f64,
    pub lower_limit: f64,
    pub midpoint: f64,
    pub tolerance: f64,
}

impl DimensionSnapshot {
    /// Read every accessor of `dim` once
    pub fn of<D: Dimension + ?Sized>(dim: &D) -> Self {
        Self {
            basic: dim.basic(),
            upper_tol: dim.upper_tol(),
            lower_tol: dim.lower_tol(),
            upper_limit: dim.upper_limit(),
            lower_limit: dim.lower_limit(),
            midpoint: dim.midpoint(),
            tolerance: dim.tolerance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-value dimension for exercising the provided methods
    #[derive(Debug)]
    struct Fixed;

    impl Dimension for Fixed {
        fn basic(&self) -> f64 {
            5.0
        }
        fn upper_tol(&self) -> f64 {
            0.25
        }
        fn lower_tol(&self) -> f64 {
            0.5
        }
        fn upper_limit(&self) -> f64 {
            5.25
        }
        fn lower_limit(&self) -> f64 {
            4.5
        }
        fn midpoint(&self) -> f64 {
            4.875
        }
        fn sample_with(&self, _rng: &mut dyn RngCore) -> f64 {
            self.midpoint()
        }
    }

    #[test]
    fn test_tolerance_is_sum_of_tolerances() {
        assert_eq!(Fixed.tolerance(), 0.75);
        assert_eq!(Fixed.limits(), (4.5, 5.25));
        assert!(Fixed.check_tolerances().is_ok());
    }

    #[test]
    fn test_tolerance_through_trait_object() {
        let dim: DimensionRef = Arc::new(Fixed);
        assert_eq!(dim.tolerance(), dim.upper_tol() + dim.lower_tol());
        assert_eq!(dim.sample(), 4.875);
    }

    #[test]
    fn test_snapshot_reads_all_accessors() {
        let snap = DimensionSnapshot::of(&Fixed);
        assert_eq!(snap.basic, 5.0);
        assert_eq!(snap.upper_limit, 5.25);
        assert_eq!(snap.lower_limit, 4.5);
        assert_eq!(snap.midpoint, 4.875);
        assert_eq!(snap.tolerance, 0.75);
    }

    #[test]
    fn test_direction_serialization() {
        let yaml = serde_yml::to_string(&Direction::Negative).unwrap();
        assert!(yaml.contains("negative"));
        let parsed: Direction = serde_yml::from_str("positive").unwrap();
        assert_eq!(parsed, Direction::Positive);
        assert_eq!(Direction::Negative.sign(), -1.0);
    }
}
