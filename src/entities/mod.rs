//! Dimension variants
//!
//! - [`LeafDimension`] - a basic value with explicit plus/minus tolerances
//! - [`DerivedDimension`] - a signed stack-up of other dimensions

pub mod derived;
pub mod leaf;

pub use derived::DerivedDimension;
pub use leaf::LeafDimension;
