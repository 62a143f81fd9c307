use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::parallel::ParallelConfig;
use crate::core::{CodeSmellName, Error, Result};
use crate::refactoring::{CommandStrategy, Refactoring, StrategyRegistry};

/// Root configuration structure for smellfix
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SmellfixConfig {
    /// Parallelism configuration
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// External refactoring tools, one per smell
    #[serde(default)]
    pub strategies: Vec<StrategyCommandConfig>,
}

/// An external tool wired to one smell.
///
/// ```toml
/// [[strategies]]
/// smell = "long_method"
/// program = "extract-method"
/// args = ["--in-place"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyCommandConfig {
    /// Smell key (`long_method`) or display name (`Long Method`)
    pub smell: String,

    /// Program to run; receives `<path> <method-name>` after `args`
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Name used in logs, defaults to `program`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StrategyCommandConfig {
    pub fn smell_name(&self) -> Result<CodeSmellName> {
        self.smell.parse::<CodeSmellName>().map_err(Error::configuration)
    }
}

impl SmellfixConfig {
    /// Build the smell-to-strategy table from `[[strategies]]`.
    ///
    /// Two entries for the same smell are rejected rather than silently
    /// replacing one another.
    pub fn build_registry(&self) -> Result<StrategyRegistry> {
        let mut registry = StrategyRegistry::new();
        for entry in &self.strategies {
            let smell = entry.smell_name()?;
            if entry.program.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Strategy for '{}' has an empty program",
                    smell
                )));
            }
            let strategy = CommandStrategy::from_config(smell, entry);
            if registry.register(Arc::new(strategy)).is_some() {
                return Err(Error::configuration(format!(
                    "More than one strategy configured for '{}'",
                    smell
                )));
            }
        }
        Ok(registry)
    }

    /// Build an orchestrator from this configuration.
    pub fn build_refactoring(&self) -> Result<Refactoring> {
        Ok(Refactoring::new(self.build_registry()?).with_parallel(self.parallel.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_full_config() {
        let config: SmellfixConfig = toml::from_str(indoc! {r#"
            [parallel]
            enabled = false

            [[strategies]]
            smell = "long_method"
            program = "extract-method"
            args = ["--in-place"]
        "#})
        .unwrap();

        assert!(!config.parallel.enabled);
        assert_eq!(config.strategies.len(), 1);
        assert_eq!(config.strategies[0].args, vec!["--in-place".to_string()]);

        let registry = config.build_registry().unwrap();
        assert_eq!(
            registry.get(CodeSmellName::LongMethod).map(|s| s.name().to_string()),
            Some("extract-method".to_string())
        );
    }

    #[test]
    fn test_unknown_smell_is_configuration_error() {
        let config = SmellfixConfig {
            strategies: vec![StrategyCommandConfig {
                smell: "god_object".to_string(),
                program: "split".to_string(),
                args: vec![],
                name: None,
            }],
            ..Default::default()
        };

        assert!(matches!(
            config.build_registry(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_duplicate_smell_is_configuration_error() {
        let entry = StrategyCommandConfig {
            smell: "Long Method".to_string(),
            program: "extract-method".to_string(),
            args: vec![],
            name: None,
        };
        let config = SmellfixConfig {
            strategies: vec![entry.clone(), entry],
            ..Default::default()
        };

        assert!(config.build_registry().is_err());
    }

    #[test]
    fn test_empty_config_has_no_strategies() {
        let config: SmellfixConfig = toml::from_str("").unwrap();
        assert!(config.build_registry().unwrap().is_empty());
        assert!(config.parallel.enabled);
    }
}
