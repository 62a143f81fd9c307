//! Refactoring strategy port and the smell-to-strategy lookup table.

use crate::core::{CodeSmellName, MethodModel};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A refactoring that resolves one kind of code smell.
///
/// Implementations are called from many rayon workers at once, each with a
/// different `(path, method)` pair. The orchestrator has already checked that
/// `method` carries [`RefactoringStrategy::smell`] before calling.
///
/// Return values:
/// - `Ok(true)`: the transformation was applied, the smell is resolved
/// - `Ok(false)`: the transformation could not be completed
/// - `Err(_)`: the strategy itself failed; reported like `Ok(false)`
pub trait RefactoringStrategy: Send + Sync {
    /// The smell this strategy resolves.
    fn smell(&self) -> CodeSmellName;

    /// Human readable strategy name for logs ("extract method", ...).
    fn name(&self) -> &str;

    fn refactor(&self, path: &Path, method: &MethodModel) -> anyhow::Result<bool>;
}

type RefactorFn = dyn Fn(&Path, &MethodModel) -> anyhow::Result<bool> + Send + Sync;

/// Strategy backed by a closure.
pub struct FnStrategy {
    smell: CodeSmellName,
    name: String,
    refactor: Box<RefactorFn>,
}

impl FnStrategy {
    pub fn new<F>(smell: CodeSmellName, name: impl Into<String>, refactor: F) -> Self
    where
        F: Fn(&Path, &MethodModel) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Self {
            smell,
            name: name.into(),
            refactor: Box::new(refactor),
        }
    }
}

impl fmt::Debug for FnStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStrategy")
            .field("smell", &self.smell)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl RefactoringStrategy for FnStrategy {
    fn smell(&self) -> CodeSmellName {
        self.smell
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refactor(&self, path: &Path, method: &MethodModel) -> anyhow::Result<bool> {
        (self.refactor)(path, method)
    }
}

/// Lookup table from smell kind to the strategy that resolves it.
///
/// At most one strategy per smell; registering a second one replaces the
/// first. Iteration follows smell order so that a method carrying several
/// smells is always processed in the same sequence.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<CodeSmellName, Arc<dyn RefactoringStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy under the smell it reports. Returns the strategy
    /// it replaced, if any.
    pub fn register(
        &mut self,
        strategy: Arc<dyn RefactoringStrategy>,
    ) -> Option<Arc<dyn RefactoringStrategy>> {
        self.strategies.insert(strategy.smell(), strategy)
    }

    pub fn with_strategy(mut self, strategy: impl RefactoringStrategy + 'static) -> Self {
        self.register(Arc::new(strategy));
        self
    }

    pub fn get(&self, smell: CodeSmellName) -> Option<&Arc<dyn RefactoringStrategy>> {
        self.strategies.get(&smell)
    }

    pub fn handled_smells(&self) -> impl Iterator<Item = CodeSmellName> + '_ {
        self.strategies.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.strategies.iter().map(|(smell, s)| (smell, s.name())))
            .finish()
    }
}
