//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;
use tolstack::{DimensionRef, LeafDimension};

/// Housing minus shaft, plus an asymmetric leaf and a stack of stacks
pub const GAP_DEFINITION: &str = r#"
units: mm
dimensions:
  housing: { basic: 10.0, upper_tol: 0.2, lower_tol: 0.2 }
  shaft: { basic: 3.0, upper_tol: 0.1, lower_tol: 0.1, distribution: uniform }
  spacer: { basic: 10.0, upper_tol: 0.5, lower_tol: 0.6 }
  gap: { add: [housing], subtract: [shaft] }
  total: { add: [gap, spacer] }
"#;

/// Helper to get a tolstack command
pub fn tolstack() -> Command {
    Command::new(cargo::cargo_bin!("tolstack"))
}

/// Write a definition file into a fresh temp directory
pub fn write_definition(content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("stack.yaml");
    std::fs::write(&path, content).unwrap();
    (tmp, path)
}

/// Shared leaf with default gaussian sampling
pub fn leaf(basic: f64, upper_tol: f64, lower_tol: f64) -> DimensionRef {
    Arc::new(LeafDimension::new(basic, upper_tol, lower_tol).unwrap())
}

/// Population mean and standard deviation
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
