//! Shared helper functions for CLI commands

use std::path::Path;

use miette::Result;

use crate::core::{DimensionSet, StackDefinition};

/// Round away floating-point noise for display (e.g. 7.300000000000001 -> 7.3)
///
/// Keeps 9 decimal places, far below any practical manufacturing tolerance.
pub fn smart_round(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = (value * 1e9).round() / 1e9;
    // Avoid printing "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Load and resolve a definition file in one step
pub fn load_definition(path: &Path) -> Result<(StackDefinition, DimensionSet)> {
    let definition = StackDefinition::load(path)?;
    let set = definition.resolve()?;
    tracing::debug!(path = %path.display(), dimensions = set.len(), "loaded definition");
    Ok((definition, set))
}
