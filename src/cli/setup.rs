//! Setup and initialization functions for CLI
//!
//! Logging setup, run once at startup.
//!
//! Worker threads are not configured here: `--jobs` becomes
//! `parallel.max_concurrency` and sizes the refactoring pool.

use tracing_subscriber::EnvFilter;

/// Default log filter for a `-v` count
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `-v` flags.
///
/// Logs go to stderr so that report output on stdout stays machine-readable.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // A second initialization (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(9), "trace");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(0);
        init_logging(3);
    }
}
