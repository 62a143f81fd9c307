use std::fs;
use std::path::{Path, PathBuf};

use super::core::SmellfixConfig;
use crate::core::{Error, Result};

/// Name of the configuration file searched for in the directory hierarchy
pub const CONFIG_FILE_NAME: &str = ".smellfix.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<SmellfixConfig> {
    let config = toml::from_str::<SmellfixConfig>(contents)?;

    // Surface unknown smells and duplicate strategies at load time
    config.build_registry()?;

    Ok(config)
}

/// Load an explicitly requested config file. Unlike [`load_config`], a
/// missing or invalid file is an error.
pub fn load_config_from_path(path: &Path) -> Result<SmellfixConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;

    parse_and_validate_config(&contents).map_err(|e| {
        Error::configuration(format!("Invalid config {}: {}", path.display(), e))
    })
}

/// Try loading config from a specific path, logging problems and falling
/// back to `None`
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<SmellfixConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring invalid config {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.smellfix.toml` starting at `start`
pub fn load_config_from(start: PathBuf) -> SmellfixConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SmellfixConfig::default()
        })
}

pub fn load_config() -> SmellfixConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            SmellfixConfig::default()
        }
    }
}
