// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod refactoring;

// Re-export commonly used types
pub use crate::core::{CodeSmellName, Error, MethodModel, Result};

pub use crate::refactoring::{
    CommandStrategy, FailureIndex, FailureIndexBuilder, FnStrategy, MethodsByPath, Refactoring,
    RefactoringReport, RefactoringStrategy, StrategyRegistry,
};

pub use crate::config::{ParallelConfig, SmellfixConfig};
