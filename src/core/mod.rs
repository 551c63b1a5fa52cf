//! Core module - dimension contract, sampling, errors and definitions

pub mod definition;
pub mod dimension;
pub mod error;
pub mod sampling;

pub use definition::{
    DefinitionError, DerivedSpec, DimensionSet, DimensionSpec, LeafSpec, StackDefinition,
};
pub use dimension::{Dimension, DimensionExt, DimensionRef, DimensionSnapshot, Direction};
pub use error::DimensionError;
pub use sampling::{
    sample_normal, sample_triangular, sample_uniform, Distribution, SampleFn, Sampling,
    DEFAULT_SIGMA_LEVEL,
};
