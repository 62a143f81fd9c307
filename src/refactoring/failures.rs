//! Failure index for refactorings that could not be completed.
//!
//! The index is a three-level mapping:
//!
//! ```text
//! smell display name -> file path -> [methods that failed]
//! ```
//!
//! It is built concurrently through [`FailureIndexBuilder`] while a batch
//! runs, then frozen into a [`FailureIndex`] that the caller owns. Indices
//! produced by independent batches are combined with [`FailureIndex::merge`].

use crate::core::{CodeSmellName, MethodModel};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type PathFailures = BTreeMap<PathBuf, Vec<MethodModel>>;

/// Read-only result of a refactoring run.
///
/// Iteration is ordered by smell name and then by path. The order of methods
/// inside one list follows append order, which is not deterministic when the
/// list was filled by concurrent workers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureIndex {
    failures: BTreeMap<String, PathFailures>,
}

impl FailureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Methods that failed `smell_name` at `path`, if any.
    pub fn get(&self, smell_name: &str, path: impl AsRef<Path>) -> Option<&[MethodModel]> {
        self.failures
            .get(smell_name)
            .and_then(|paths| paths.get(path.as_ref()))
            .map(Vec::as_slice)
    }

    /// Convenience lookup keyed by the smell itself.
    pub fn get_smell(&self, smell: CodeSmellName, path: impl AsRef<Path>) -> Option<&[MethodModel]> {
        self.get(smell.name(), path)
    }

    /// Paths with at least one failure for `smell_name`.
    pub fn paths(&self, smell_name: &str) -> impl Iterator<Item = &Path> {
        self.failures
            .get(smell_name)
            .into_iter()
            .flat_map(|paths| paths.keys().map(PathBuf::as_path))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path, &[MethodModel])> {
        self.failures.iter().flat_map(|(smell, paths)| {
            paths
                .iter()
                .map(move |(path, methods)| (smell.as_str(), path.as_path(), methods.as_slice()))
        })
    }

    /// Number of recorded failures across every smell and path.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Combine two indices.
    ///
    /// Smell keys and path keys are unioned. When both sides hold the same
    /// (smell, path) pair the method lists are concatenated, `self` first.
    /// Entries are never deduplicated: two equal methods are two failures.
    pub fn merge(mut self, other: FailureIndex) -> FailureIndex {
        for (smell, other_paths) in other.failures {
            let paths = self.failures.entry(smell).or_default();
            for (path, mut methods) in other_paths {
                paths.entry(path).or_default().append(&mut methods);
            }
        }
        self
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeMap<PathBuf, Vec<MethodModel>>> {
        self.failures
    }
}

impl From<BTreeMap<String, BTreeMap<PathBuf, Vec<MethodModel>>>> for FailureIndex {
    fn from(failures: BTreeMap<String, BTreeMap<PathBuf, Vec<MethodModel>>>) -> Self {
        // Empty inner maps would make otherwise-equal indices compare unequal.
        let failures = failures
            .into_iter()
            .map(|(smell, paths)| {
                let paths: PathFailures = paths
                    .into_iter()
                    .filter(|(_, methods)| !methods.is_empty())
                    .collect();
                (smell, paths)
            })
            .filter(|(_, paths)| !paths.is_empty())
            .collect();
        Self { failures }
    }
}

/// Concurrent accumulator used while a batch is running.
///
/// Every mutation goes through [`FailureIndexBuilder::record`], which performs
/// get-or-insert on both map levels through DashMap's entry API. The entry
/// guard holds the shard lock for the whole insert-then-append step, so two
/// workers failing on the same (smell, path) pair can never both create a
/// fresh list.
#[derive(Debug, Default)]
pub struct FailureIndexBuilder {
    failures: DashMap<String, DashMap<PathBuf, Vec<MethodModel>>>,
}

impl FailureIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, smell: CodeSmellName, path: &Path, method: MethodModel) {
        let paths = self.failures.entry(smell.name().to_string()).or_default();
        paths.entry(path.to_path_buf()).or_default().push(method);
    }

    /// Freeze the accumulated failures. Consuming `self` guarantees no worker
    /// still holds a reference.
    pub fn finish(self) -> FailureIndex {
        let failures = self
            .failures
            .into_iter()
            .map(|(smell, paths)| (smell, paths.into_iter().collect::<PathFailures>()))
            .collect();
        FailureIndex { failures }
    }
}
