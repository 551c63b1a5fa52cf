//! Derived dimension - a signed stack-up of other dimensions
//!
//! Represents `sum(positives) - sum(negatives)`. Constituents are shared
//! handles, so one leaf can feed several stacks and a derived dimension can
//! itself be a constituent of another.
//!
//! When a dimension is subtracted its tolerances swap roles: its lower
//! tolerance pulls the stack's upper side and its upper tolerance pulls the
//! lower side, mirroring how its lower limit feeds the stack's upper limit.
//! That can leave a stack with a negative tolerance; construction allows it
//! and `DimensionExt::check_tolerances` reports it.

use rand::RngCore;

use crate::core::dimension::{Dimension, DimensionRef, Direction};

/// A linear combination of dimensions with signs +1 (positives) and -1 (negatives)
///
/// Every property is recomputed from the constituents on each access.
#[derive(Debug, Clone, Default)]
pub struct DerivedDimension {
    positives: Vec<DimensionRef>,
    negatives: Vec<DimensionRef>,
}

impl DerivedDimension {
    /// Build from the added and subtracted constituents; both may be empty
    pub fn new(positives: Vec<DimensionRef>, negatives: Vec<DimensionRef>) -> Self {
        tracing::debug!(
            positives = positives.len(),
            negatives = negatives.len(),
            "created derived dimension"
        );
        Self {
            positives,
            negatives,
        }
    }

    /// Build from `(direction, dimension)` pairs, keeping order within each sign
    pub fn from_contributors<I>(contributors: I) -> Self
    where
        I: IntoIterator<Item = (Direction, DimensionRef)>,
    {
        let mut positives = Vec::new();
        let mut negatives = Vec::new();
        for (direction, dim) in contributors {
            match direction {
                Direction::Positive => positives.push(dim),
                Direction::Negative => negatives.push(dim),
            }
        }
        Self::new(positives, negatives)
    }

    /// Constituents added to the stack
    pub fn positives(&self) -> &[DimensionRef] {
        &self.positives
    }

    /// Constituents subtracted from the stack
    pub fn negatives(&self) -> &[DimensionRef] {
        &self.negatives
    }

    /// All constituents with their direction, positives first
    pub fn contributors(&self) -> impl Iterator<Item = (Direction, &DimensionRef)> + '_ {
        self.positives
            .iter()
            .map(|d| (Direction::Positive, d))
            .chain(self.negatives.iter().map(|d| (Direction::Negative, d)))
    }

    /// Get number of contributors
    pub fn contributor_count(&self) -> usize {
        self.positives.len() + self.negatives.len()
    }

    /// True when there are no constituents (an all-zero dimension)
    pub fn is_empty(&self) -> bool {
        self.positives.is_empty() && self.negatives.is_empty()
    }

    /// `sum(pos(d) for positives) - sum(neg(d) for negatives)`
    fn combine<P, N>(&self, pos: P, neg: N) -> f64
    where
        P: Fn(&dyn Dimension) -> f64,
        N: Fn(&dyn Dimension) -> f64,
    {
        let added: f64 = self.positives.iter().map(|d| pos(d.as_ref())).sum();
        let subtracted: f64 = self.negatives.iter().map(|d| neg(d.as_ref())).sum();
        added - subtracted
    }
}

impl Dimension for DerivedDimension {
    fn basic(&self) -> f64 {
        self.combine(|d| d.basic(), |d| d.basic())
    }

    fn upper_tol(&self) -> f64 {
        self.combine(|d| d.upper_tol(), |d| d.lower_tol())
    }

    fn lower_tol(&self) -> f64 {
        self.combine(|d| d.lower_tol(), |d| d.upper_tol())
    }

    fn upper_limit(&self) -> f64 {
        self.combine(|d| d.upper_limit(), |d| d.lower_limit())
    }

    fn lower_limit(&self) -> f64 {
        self.combine(|d| d.lower_limit(), |d| d.upper_limit())
    }

    fn midpoint(&self) -> f64 {
        self.combine(|d| d.midpoint(), |d| d.midpoint())
    }

    fn sample_with(&self, rng: &mut dyn RngCore) -> f64 {
        let added: f64 = self.positives.iter().map(|d| d.sample_with(rng)).sum();
        let subtracted: f64 = self.negatives.iter().map(|d| d.sample_with(rng)).sum();
        added - subtracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dimension::DimensionExt;
    use crate::core::error::DimensionError;
    use crate::entities::leaf::LeafDimension;
    use std::sync::Arc;

    fn leaf(basic: f64, ut: f64, lt: f64) -> DimensionRef {
        Arc::new(LeafDimension::new(basic, ut, lt).unwrap())
    }

    #[test]
    fn test_empty_is_all_zero() {
        let dim = DerivedDimension::new(vec![], vec![]);
        assert!(dim.is_empty());
        assert_eq!(dim.basic(), 0.0);
        assert_eq!(dim.upper_limit(), 0.0);
        assert_eq!(dim.lower_limit(), 0.0);
        assert_eq!(dim.midpoint(), 0.0);
        assert_eq!(dim.tolerance(), 0.0);
        assert_eq!(dim.sample(), 0.0);
    }

    #[test]
    fn test_stack_up_scenario() {
        let a = leaf(10.0, 0.2, 0.2);
        let b = leaf(3.0, 0.1, 0.1);
        let d = DerivedDimension::new(vec![a], vec![b]);

        assert!((d.basic() - 7.0).abs() < 1e-12);
        assert!((d.upper_limit() - 7.3).abs() < 1e-12);
        assert!((d.lower_limit() - 6.7).abs() < 1e-12);
        assert!((d.upper_tol() - 0.1).abs() < 1e-12);
        assert!((d.lower_tol() - 0.1).abs() < 1e-12);
        assert_eq!(d.tolerance(), d.upper_tol() + d.lower_tol());
    }

    #[test]
    fn test_from_contributors_keeps_order() {
        let a = leaf(1.0, 0.0, 0.0);
        let b = leaf(2.0, 0.0, 0.0);
        let c = leaf(4.0, 0.0, 0.0);
        let d = DerivedDimension::from_contributors([
            (Direction::Positive, a),
            (Direction::Negative, b),
            (Direction::Positive, c),
        ]);
        assert_eq!(d.positives().len(), 2);
        assert_eq!(d.negatives().len(), 1);
        assert_eq!(d.positives()[1].basic(), 4.0);
        assert_eq!(d.basic(), 3.0);

        let directions: Vec<Direction> = d.contributors().map(|(dir, _)| dir).collect();
        assert_eq!(
            directions,
            vec![Direction::Positive, Direction::Positive, Direction::Negative]
        );
    }

    #[test]
    fn test_negative_tolerance_is_permitted_but_checkable() {
        // Subtracted part's lower tolerance exceeds the added part's upper tolerance
        let a = leaf(10.0, 0.1, 0.1);
        let b = leaf(3.0, 0.5, 0.5);
        let d = DerivedDimension::new(vec![a], vec![b]);

        assert!(d.upper_tol() < 0.0);
        assert!(d.lower_tol() < 0.0);
        assert!(d.lower_limit() <= d.upper_limit());
        assert!(matches!(
            d.check_tolerances(),
            Err(DimensionError::NegativeTolerance { .. })
        ));
    }

    #[test]
    fn test_check_tolerances_passes_for_sums() {
        let d =
            DerivedDimension::new(vec![leaf(1.0, 0.1, 0.2), leaf(2.0, 0.3, 0.0)], vec![]);
        assert!(d.check_tolerances().is_ok());
    }

    #[test]
    fn test_sampling_combines_constituents() {
        let a: DimensionRef =
            Arc::new(LeafDimension::with_sample_fn(10.0, 0.1, 0.1, || 10.5).unwrap());
        let b: DimensionRef =
            Arc::new(LeafDimension::with_sample_fn(3.0, 0.1, 0.1, || 2.0).unwrap());
        let d = DerivedDimension::new(vec![a.clone(), a], vec![b]);
        assert_eq!(d.sample(), 19.0);
    }
}
