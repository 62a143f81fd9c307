use super::failures::FailureIndex;
use super::orchestrator::{eligible_smells, MethodsByPath};
use super::strategy::StrategyRegistry;
use crate::core::MethodModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Counts describing one refactoring run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub files: usize,
    pub methods: usize,
    /// Strategy calls made (method, smell) pairs with a registered strategy
    pub attempted: usize,
    pub resolved: usize,
    pub failed: usize,
}

/// Everything a caller needs to present the outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactoringReport {
    pub summary: ReportSummary,
    pub failures: FailureIndex,
    /// Methods still carrying at least one smell after the run
    pub unresolved: BTreeMap<PathBuf, Vec<MethodModel>>,
}

/// Number of strategy calls a run over `methods` will make.
///
/// Must be computed before the run, since successful calls clear smells.
pub fn count_attempts(registry: &StrategyRegistry, methods: &MethodsByPath) -> usize {
    methods
        .values()
        .flatten()
        .map(|method| eligible_smells(registry, method).count())
        .sum()
}

impl RefactoringReport {
    /// Build a report from the post-run state of `methods`.
    pub fn new(attempted: usize, methods: &MethodsByPath, failures: FailureIndex) -> Self {
        let failed = failures.total_failures();
        let unresolved: BTreeMap<PathBuf, Vec<MethodModel>> = methods
            .iter()
            .map(|(path, methods)| {
                let remaining: Vec<MethodModel> =
                    methods.iter().filter(|m| m.has_smells()).cloned().collect();
                (path.clone(), remaining)
            })
            .filter(|(_, remaining)| !remaining.is_empty())
            .collect();

        Self {
            summary: ReportSummary {
                files: methods.len(),
                methods: methods.values().map(Vec::len).sum(),
                attempted,
                resolved: attempted.saturating_sub(failed),
                failed,
            },
            failures,
            unresolved,
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
