use crate::config::{load_config, load_config_from_path, SmellfixConfig};
use crate::io::{self, create_writer, OutputFormat};
use crate::refactoring::{count_attempts, RefactoringReport};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

/// Settings for one `smellfix refactor` invocation.
#[derive(Debug, Clone)]
pub struct RefactorConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub jobs: usize,
    pub no_parallel: bool,
}

fn resolve_config(config: &RefactorConfig) -> Result<SmellfixConfig> {
    let mut resolved = match &config.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config(),
    };

    if config.no_parallel {
        resolved.parallel.enabled = false;
    } else if config.jobs > 0 {
        resolved.parallel = resolved.parallel.with_jobs(config.jobs);
    }
    Ok(resolved)
}

/// Load methods, run every configured strategy and write the report.
///
/// Failed refactorings are part of the report, not an error.
pub fn handle_refactor(config: RefactorConfig) -> Result<RefactoringReport> {
    let settings = resolve_config(&config)?;
    let refactoring = settings.build_refactoring()?;
    if refactoring.registry().is_empty() {
        tracing::warn!("No refactoring strategies configured; nothing will be attempted");
    }

    let mut methods = io::load_methods(&config.input)
        .with_context(|| format!("Failed to load methods from {}", config.input.display()))?;

    let attempted = count_attempts(refactoring.registry(), &methods);
    info!(
        files = methods.len(),
        attempted,
        strategies = refactoring.registry().len(),
        workers = refactoring.parallel().effective_concurrency(),
        "Starting refactoring"
    );

    let failures = refactoring.refactor_all(&mut methods)?;
    let report = RefactoringReport::new(attempted, &methods, failures);

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            create_writer(config.format, BufWriter::new(file)).write_report(&report)?;
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(config.format, stdout.lock()).write_report(&report)?;
        }
    }

    Ok(report)
}
