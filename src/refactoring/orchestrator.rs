//! Concurrent dispatch of smelly methods to refactoring strategies.
//!
//! Two entry points share one dispatch loop:
//!
//! - [`Refactoring::refactor`] handles one file: every method is checked
//!   against the registered strategies in parallel and failures land in a
//!   fresh [`FailureIndex`].
//! - [`Refactoring::refactor_all`] handles many files: each file runs through
//!   the single-file loop in parallel and the per-file indices are folded
//!   together with [`FailureIndex::merge`].
//!
//! Successful refactorings remove the resolved smell from the caller's
//! [`MethodModel`] in place. That mutation is part of the return contract:
//! after a call, the smells left on each method are the ones still unresolved.

use super::failures::{FailureIndex, FailureIndexBuilder};
use super::strategy::{RefactoringStrategy, StrategyRegistry};
use crate::config::ParallelConfig;
use crate::core::{CodeSmellName, Error, MethodModel, Result};
use rayon::prelude::*;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, debug_span, info, warn};

/// Methods to refactor, grouped by the file that contains them.
pub type MethodsByPath = HashMap<PathBuf, Vec<MethodModel>>;

/// Result of a single strategy call.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttemptOutcome {
    Resolved,
    Failed,
    Faulted(String),
}

/// Refactoring orchestrator.
///
/// Holds the smell-to-strategy table and the parallelism settings. It keeps
/// no state between calls; every call builds and returns its own index.
pub struct Refactoring {
    registry: StrategyRegistry,
    parallel: ParallelConfig,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Refactoring {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry,
            parallel: ParallelConfig::default(),
            pool: None,
        }
    }

    /// Apply parallelism settings. A `max_concurrency` limit gets a dedicated
    /// rayon pool; without one the global pool is used.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.pool = if parallel.enabled && parallel.max_concurrency.is_some() {
            let threads = parallel.effective_concurrency();
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => Some(Arc::new(pool)),
                Err(e) => {
                    warn!("Failed to build refactoring thread pool: {}. Using global pool.", e);
                    None
                }
            }
        } else {
            None
        };
        self.parallel = parallel;
        self
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn parallel(&self) -> &ParallelConfig {
        &self.parallel
    }

    /// Refactor the methods of one file.
    ///
    /// Every method carrying a smell with a registered strategy is handed to
    /// that strategy. On success the smell is removed from the method; on
    /// failure (or a strategy fault) a copy of the method is recorded under
    /// `index[smell.name()][path]`. Methods without a handled smell are not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty `path`, before any
    /// strategy is called.
    pub fn refactor(&self, path: &Path, methods: &mut [MethodModel]) -> Result<FailureIndex> {
        validate_path(path)?;
        Ok(self.install(|| self.refactor_batch(path, methods)))
    }

    /// Refactor the methods of several files concurrently.
    ///
    /// The combined index equals merging the single-file results of every
    /// entry, with method lists concatenated on a shared (smell, path) key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any key is an empty path. All
    /// keys are checked before work starts, so no strategy runs.
    pub fn refactor_all(&self, methods: &mut MethodsByPath) -> Result<FailureIndex> {
        methods.keys().try_for_each(|path| validate_path(path))?;

        let files = methods.len();
        let index = self.install(|| {
            if self.parallel.enabled {
                methods
                    .par_iter_mut()
                    .map(|(path, methods)| self.refactor_batch(path, methods))
                    .reduce(FailureIndex::new, FailureIndex::merge)
            } else {
                methods
                    .iter_mut()
                    .map(|(path, methods)| self.refactor_batch(path, methods))
                    .fold(FailureIndex::new(), FailureIndex::merge)
            }
        });

        info!(
            files,
            failures = index.total_failures(),
            "Refactoring finished"
        );
        Ok(index)
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn refactor_batch(&self, path: &Path, methods: &mut [MethodModel]) -> FailureIndex {
        let _span = debug_span!("refactor_batch", path = %path.display(), methods = methods.len())
            .entered();
        let failures = FailureIndexBuilder::new();

        if self.parallel.enabled {
            methods
                .par_iter_mut()
                .for_each(|method| self.refactor_method(path, method, &failures));
        } else {
            methods
                .iter_mut()
                .for_each(|method| self.refactor_method(path, method, &failures));
        }

        failures.finish()
    }

    fn refactor_method(&self, path: &Path, method: &mut MethodModel, failures: &FailureIndexBuilder) {
        let smells: Vec<CodeSmellName> = eligible_smells(&self.registry, method).collect();
        for smell in smells {
            let Some(strategy) = self.registry.get(smell) else {
                continue;
            };

            match attempt(strategy.as_ref(), path, method) {
                AttemptOutcome::Resolved => {
                    debug!(path = %path.display(), method = %method.name, %smell, "Refactoring applied");
                    method.remove_smell(smell);
                }
                AttemptOutcome::Failed => {
                    debug!(path = %path.display(), method = %method.name, %smell, "Refactoring failed");
                    failures.record(smell, path, method.clone());
                }
                AttemptOutcome::Faulted(reason) => {
                    warn!(
                        path = %path.display(),
                        method = %method.name,
                        strategy = strategy.name(),
                        "Refactoring strategy fault: {}",
                        reason
                    );
                    failures.record(smell, path, method.clone());
                }
            }
        }
    }
}

impl std::fmt::Debug for Refactoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refactoring")
            .field("registry", &self.registry)
            .field("parallel", &self.parallel)
            .finish()
    }
}

/// Run one strategy call, turning errors and panics into a fault so that a
/// misbehaving strategy only affects its own method.
fn attempt(strategy: &dyn RefactoringStrategy, path: &Path, method: &MethodModel) -> AttemptOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| strategy.refactor(path, method))) {
        Ok(Ok(true)) => AttemptOutcome::Resolved,
        Ok(Ok(false)) => AttemptOutcome::Failed,
        Ok(Err(e)) => AttemptOutcome::Faulted(format!("{:#}", e)),
        Err(payload) => AttemptOutcome::Faulted(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::invalid_argument("path must not be empty"));
    }
    Ok(())
}

/// Smells the registry can act on for `method`, in dispatch order.
pub fn eligible_smells<'a>(
    registry: &'a StrategyRegistry,
    method: &'a MethodModel,
) -> impl Iterator<Item = CodeSmellName> + 'a {
    registry.handled_smells().filter(move |smell| method.has_smell(*smell))
}
