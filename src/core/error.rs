//! Dimension validation errors

use thiserror::Error;

use crate::core::sampling::Distribution;

/// Errors raised while constructing or checking a dimension
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    #[error("Basic dimension must be non-negative, got {0}")]
    NegativeBasic(f64),

    #[error("Upper tolerance must be non-negative, got {0}")]
    NegativeUpperTol(f64),

    #[error("Lower tolerance must be non-negative, got {0}")]
    NegativeLowerTol(f64),

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Sigma level must be a finite number greater than zero, got {0}")]
    InvalidSigmaLevel(f64),

    #[error("Sigma level only applies to normal sampling, not {0}")]
    SigmaLevelNotApplicable(Distribution),

    /// Only produced by an explicit check; derived dimensions never fail on their own
    #[error("Tolerances went negative (upper {upper_tol}, lower {lower_tol})")]
    NegativeTolerance { upper_tol: f64, lower_tol: f64 },
}

impl DimensionError {
    /// True for the three input-validation conditions a leaf rejects
    pub fn is_negative_input(&self) -> bool {
        matches!(
            self,
            DimensionError::NegativeBasic(_)
                | DimensionError::NegativeUpperTol(_)
                | DimensionError::NegativeLowerTol(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DimensionError::NegativeBasic(-10.0);
        assert_eq!(
            err.to_string(),
            "Basic dimension must be non-negative, got -10"
        );

        let err = DimensionError::NotFinite {
            field: "upper_tol",
            value: f64::INFINITY,
        };
        assert!(err.to_string().starts_with("upper_tol must be a finite number"));

        let err = DimensionError::SigmaLevelNotApplicable(Distribution::Uniform);
        assert_eq!(
            err.to_string(),
            "Sigma level only applies to normal sampling, not uniform"
        );
    }

    #[test]
    fn test_is_negative_input() {
        assert!(DimensionError::NegativeBasic(-1.0).is_negative_input());
        assert!(DimensionError::NegativeUpperTol(-1.0).is_negative_input());
        assert!(DimensionError::NegativeLowerTol(-1.0).is_negative_input());
        assert!(!DimensionError::InvalidSigmaLevel(0.0).is_negative_input());
    }
}
