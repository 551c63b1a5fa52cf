//! tolstack: composable dimensional tolerances
//!
//! Leaf dimensions carry a basic value with asymmetric plus/minus tolerances;
//! derived dimensions combine them through signed addition and subtraction
//! into stack-ups. Every dimension can be sampled for Monte Carlo simulation.

pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;

pub use crate::core::{Dimension, DimensionError, DimensionExt, DimensionRef, Sampling};
pub use crate::entities::{DerivedDimension, LeafDimension};
