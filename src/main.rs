use anyhow::Result;
use smellfix::cli::{self, Commands};
use smellfix::commands::{self, RefactorConfig};

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Refactor {
            input,
            config,
            format,
            output,
            jobs,
            no_parallel,
            verbosity,
        } => {
            cli::init_logging(verbosity);

            let report = commands::handle_refactor(RefactorConfig {
                input,
                config,
                format: format.into(),
                output,
                jobs,
                no_parallel,
            })?;

            if report.has_failures() {
                tracing::info!(
                    failed = report.summary.failed,
                    "Some refactorings could not be applied"
                );
            }
            Ok(())
        }
        Commands::Init { force } => commands::init::init_config(force),
    }
}
