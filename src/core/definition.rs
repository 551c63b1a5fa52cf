//! Stack definition documents
//!
//! A definition names leaf and derived dimensions in one YAML file and
//! resolves them into shared [`DimensionRef`] handles:
//!
//! ```yaml
//! units: mm
//! dimensions:
//!   housing: { basic: 10.0, upper_tol: 0.2, lower_tol: 0.2 }
//!   shaft:   { basic: 3.0, upper_tol: 0.1, lower_tol: 0.1, distribution: uniform }
//!   gap:     { add: [housing], subtract: [shaft] }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::dimension::DimensionRef;
use crate::core::error::DimensionError;
use crate::core::sampling::{Distribution, Sampling};
use crate::entities::{DerivedDimension, LeafDimension};
use crate::yaml::{parse_yaml, parse_yaml_file, YamlError};

/// Errors from loading or resolving a stack definition
#[derive(Debug, Error, Diagnostic)]
pub enum DefinitionError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Definition contains no dimensions")]
    #[diagnostic(code(tolstack::definition::empty))]
    Empty,

    #[error("Dimension '{name}' references unknown dimension '{reference}'")]
    #[diagnostic(
        code(tolstack::definition::unknown_reference),
        help("every name in add/subtract must be defined under `dimensions`")
    )]
    UnknownReference { name: String, reference: String },

    #[error("Dimension cycle detected: {chain}")]
    #[diagnostic(
        code(tolstack::definition::cycle),
        help("a derived dimension cannot depend on itself, directly or through others")
    )]
    Cycle { chain: String },

    #[error("Invalid dimension '{name}'")]
    #[diagnostic(code(tolstack::definition::invalid_dimension))]
    InvalidDimension {
        name: String,
        #[source]
        source: DimensionError,
    },

    #[error("No dimension named '{0}'")]
    #[diagnostic(code(tolstack::definition::unknown_dimension))]
    UnknownDimension(String),
}

/// A directly specified dimension entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeafSpec {
    pub basic: f64,
    pub upper_tol: f64,
    pub lower_tol: f64,

    #[serde(default)]
    pub distribution: Distribution,

    /// Band width in standard deviations (normal only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma_level: Option<f64>,
}

impl LeafSpec {
    fn sampling(&self) -> Result<Sampling, DimensionError> {
        let Some(level) = self.sigma_level else {
            return Ok(self.distribution.into());
        };
        let normal = Sampling::normal(level)?;
        match self.distribution {
            Distribution::Normal => Ok(normal),
            other => Err(DimensionError::SigmaLevelNotApplicable(other)),
        }
    }
}

/// A stack-up entry: `sum(add) - sum(subtract)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DerivedSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtract: Vec<String>,
}

/// One named entry in a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionSpec {
    Leaf(LeafSpec),
    Derived(DerivedSpec),
}

/// A named set of dimensions, as read from a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackDefinition {
    /// Units label carried through to output
    #[serde(default = "default_units")]
    pub units: String,

    pub dimensions: BTreeMap<String, DimensionSpec>,
}

fn default_units() -> String {
    "mm".to_string()
}

impl StackDefinition {
    /// Parse a definition from YAML (or JSON) text
    pub fn from_yaml(content: &str, filename: &str) -> Result<Self, DefinitionError> {
        Ok(parse_yaml(content, filename)?)
    }

    /// Load a definition file
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        Ok(parse_yaml_file(path)?)
    }

    /// Whether `name` is a derived (stack-up) entry
    pub fn is_derived(&self, name: &str) -> bool {
        matches!(self.dimensions.get(name), Some(DimensionSpec::Derived(_)))
    }

    /// Build every named dimension, sharing constituents referenced more than once
    pub fn resolve(&self) -> Result<DimensionSet, DefinitionError> {
        if self.dimensions.is_empty() {
            return Err(DefinitionError::Empty);
        }

        let mut resolver = Resolver {
            specs: &self.dimensions,
            built: HashMap::new(),
            path: Vec::new(),
        };
        let mut dimensions = BTreeMap::new();
        for name in self.dimensions.keys() {
            let dim = resolver.build(name)?;
            dimensions.insert(name.clone(), dim);
        }

        tracing::debug!(count = dimensions.len(), "resolved stack definition");

        Ok(DimensionSet {
            units: self.units.clone(),
            dimensions,
        })
    }
}

/// Depth-first builder; `path` holds the names currently being built
struct Resolver<'a> {
    specs: &'a BTreeMap<String, DimensionSpec>,
    built: HashMap<&'a str, DimensionRef>,
    path: Vec<&'a str>,
}

impl<'a> Resolver<'a> {
    fn build(&mut self, name: &'a str) -> Result<DimensionRef, DefinitionError> {
        if let Some(dim) = self.built.get(name) {
            return Ok(Arc::clone(dim));
        }
        if let Some(start) = self.path.iter().position(|n| *n == name) {
            let mut chain: Vec<&str> = self.path[start..].to_vec();
            chain.push(name);
            return Err(DefinitionError::Cycle {
                chain: chain.join(" -> "),
            });
        }

        let specs = self.specs;
        let spec = specs
            .get(name)
            .ok_or_else(|| DefinitionError::UnknownDimension(name.to_string()))?;

        let dim: DimensionRef = match spec {
            DimensionSpec::Leaf(leaf) => {
                let dim = leaf
                    .sampling()
                    .and_then(|sampling| {
                        LeafDimension::with_sampling(
                            leaf.basic,
                            leaf.upper_tol,
                            leaf.lower_tol,
                            sampling,
                        )
                    })
                    .map_err(|source| DefinitionError::InvalidDimension {
                        name: name.to_string(),
                        source,
                    })?;
                Arc::new(dim)
            }
            DimensionSpec::Derived(derived) => {
                self.path.push(name);
                let positives = self.build_refs(name, &derived.add)?;
                let negatives = self.build_refs(name, &derived.subtract)?;
                self.path.pop();
                Arc::new(DerivedDimension::new(positives, negatives))
            }
        };

        self.built.insert(name, Arc::clone(&dim));
        Ok(dim)
    }

    fn build_refs(
        &mut self,
        owner: &str,
        names: &'a [String],
    ) -> Result<Vec<DimensionRef>, DefinitionError> {
        let specs = self.specs;
        names
            .iter()
            .map(|reference| {
                // Look up the key so the borrow lives as long as the spec map
                let key = specs
                    .get_key_value(reference.as_str())
                    .map(|(k, _)| k.as_str())
                    .ok_or_else(|| DefinitionError::UnknownReference {
                        name: owner.to_string(),
                        reference: reference.clone(),
                    })?;
                self.build(key)
            })
            .collect()
    }
}

/// Resolved dimensions keyed by name
#[derive(Debug, Clone)]
pub struct DimensionSet {
    units: String,
    dimensions: BTreeMap<String, DimensionRef>,
}

impl DimensionSet {
    /// Units label from the definition
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Look up a dimension by name
    pub fn get(&self, name: &str) -> Option<&DimensionRef> {
        self.dimensions.get(name)
    }

    /// Look up a dimension by name, failing if absent
    pub fn require(&self, name: &str) -> Result<&DimensionRef, DefinitionError> {
        self.get(name)
            .ok_or_else(|| DefinitionError::UnknownDimension(name.to_string()))
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.dimensions.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DimensionRef)> + '_ {
        self.dimensions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}
