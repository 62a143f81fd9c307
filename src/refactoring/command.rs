use super::strategy::RefactoringStrategy;
use crate::config::StrategyCommandConfig;
use crate::core::{CodeSmellName, MethodModel};
use anyhow::Context;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Strategy that delegates to an external refactoring tool.
///
/// The tool is invoked as `program [args...] <path> <method-name>`. Exit code
/// zero means the refactoring was applied; any other exit code means it could
/// not be completed. A tool that cannot be started is a strategy fault.
#[derive(Debug, Clone)]
pub struct CommandStrategy {
    smell: CodeSmellName,
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandStrategy {
    pub fn new(smell: CodeSmellName, program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            smell,
            name: program.clone(),
            program,
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn from_config(smell: CodeSmellName, config: &StrategyCommandConfig) -> Self {
        let strategy = Self::new(smell, config.program.clone()).with_args(config.args.iter().cloned());
        match &config.name {
            Some(name) => strategy.with_name(name.clone()),
            None => strategy,
        }
    }
}

impl RefactoringStrategy for CommandStrategy {
    fn smell(&self) -> CodeSmellName {
        self.smell
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn refactor(&self, path: &Path, method: &MethodModel) -> anyhow::Result<bool> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .arg(&method.name)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run refactoring tool '{}'", self.program))?;

        if !output.status.success() {
            debug!(
                tool = %self.program,
                method = %method.name,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Refactoring tool reported failure"
            );
        }

        Ok(output.status.success())
    }
}
