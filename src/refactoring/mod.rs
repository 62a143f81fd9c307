//! Refactoring orchestration.
//!
//! Methods tagged with code smells are dispatched to the strategy registered
//! for each smell. Resolved smells are cleared on the method; unresolved
//! attempts are collected in a [`FailureIndex`].

pub mod command;
pub mod failures;
pub mod orchestrator;
pub mod report;
pub mod strategy;

pub use command::CommandStrategy;
pub use failures::{FailureIndex, FailureIndexBuilder};
pub use orchestrator::{eligible_smells, MethodsByPath, Refactoring};
pub use report::{count_attempts, RefactoringReport, ReportSummary};
pub use strategy::{FnStrategy, RefactoringStrategy, StrategyRegistry};
