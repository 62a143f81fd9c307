//! Parallelism configuration for refactoring runs.
//!
//! Controls whether methods and files are dispatched to rayon workers and how
//! many workers a run may use.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Configuration for parallel refactoring.
///
/// # Example
///
/// ```rust
/// use smellfix::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
/// };
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Enable parallel processing (default: true)
    ///
    /// When disabled, methods and files are processed one at a time on the
    /// calling thread. Useful for debugging strategies that are not
    /// thread-safe.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Maximum concurrent strategy calls (default: rayon global pool)
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Limit the number of worker threads. Zero means "no limit".
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.max_concurrency = if jobs == 0 { None } else { Some(jobs) };
        self
    }

    /// Get the effective concurrency level.
    ///
    /// Returns the configured max_concurrency, or the number of
    /// available CPU cores if not specified.
    pub fn effective_concurrency(&self) -> usize {
        if !self.enabled {
            return 1;
        }
        self.max_concurrency.unwrap_or_else(num_cpus)
    }
}

/// Returns the number of available CPU cores.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert!(config.enabled);
        assert!(config.max_concurrency.is_none());
    }

    #[test]
    fn test_parallel_config_sequential() {
        let config = ParallelConfig::sequential();
        assert!(!config.enabled);
        assert_eq!(config.effective_concurrency(), 1);
    }

    #[test]
    fn test_effective_concurrency() {
        let config = ParallelConfig {
            enabled: true,
            max_concurrency: Some(4),
        };
        assert_eq!(config.effective_concurrency(), 4);

        let config = ParallelConfig::default();
        assert!(config.effective_concurrency() >= 1);
    }

    #[test]
    fn test_with_jobs_zero_means_unbounded() {
        assert_eq!(ParallelConfig::new().with_jobs(0).max_concurrency, None);
        assert_eq!(ParallelConfig::new().with_jobs(3).max_concurrency, Some(3));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ParallelConfig = toml::from_str("max_concurrency = 2").unwrap();
        assert!(config.enabled);
        assert_eq!(config.max_concurrency, Some(2));
    }
}
