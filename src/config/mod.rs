mod core;
mod loader;
mod parallel;

pub use self::core::{SmellfixConfig, StrategyCommandConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
