//! Version matrix: which ansible-core releases to benchmark on which Python.
//!
//! The matrix is an ordered mapping from interpreter version to an ordered
//! list of ansible-core versions. Iteration order is insertion order, so a
//! run always walks interpreters and releases in the order the matrix defines
//! them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ordered mapping from Python version to ansible-core versions under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionMatrix(IndexMap<String, Vec<String>>);

impl VersionMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interpreter with its ordered list of ansible-core versions.
    pub fn insert(&mut self, python_version: impl Into<String>, ansible_versions: Vec<String>) {
        self.0.insert(python_version.into(), ansible_versions);
    }

    /// Iterate interpreters in matrix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Ansible versions configured for an interpreter, if present.
    pub fn get(&self, python_version: &str) -> Option<&[String]> {
        self.0.get(python_version).map(Vec::as_slice)
    }

    /// Number of interpreter entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the matrix has no interpreter entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of (python, ansible) pairs the matrix will run.
    pub fn pair_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Fails with [`Error::EmptyMatrix`] when there is nothing to run.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyMatrix);
        }
        Ok(())
    }
}

/// `"{minor}.{patch}"` for every patch level in the range.
fn patch_series(minor: &str, patches: std::ops::RangeInclusive<u32>) -> Vec<String> {
    patches.map(|p| format!("{minor}.{p}")).collect()
}

/// The default benchmark set: every ansible-core release supported by each
/// interpreter, 2.12.0 through 2.15.1.
pub fn default_matrix() -> VersionMatrix {
    let v2_12 = patch_series("2.12", 0..=10);
    let v2_13 = patch_series("2.13", 0..=10);
    let v2_14 = patch_series("2.14", 0..=7);
    let v2_15 = patch_series("2.15", 0..=1);

    // ansible-core dropped Python 3.8 support after 2.13.
    let py38: Vec<String> = [&v2_12[..], &v2_13[..]].concat();
    let py39_plus: Vec<String> = [&v2_12[..], &v2_13[..], &v2_14[..], &v2_15[..]].concat();

    let mut matrix = VersionMatrix::new();
    matrix.insert("3.8", py38);
    matrix.insert("3.9", py39_plus.clone());
    matrix.insert("3.10", py39_plus.clone());
    matrix.insert("3.11", py39_plus);
    matrix
}
