//! CLI command implementations for smellfix operations.
//!
//! - **refactor**: run configured strategies over a JSON list of methods
//! - **init**: write a default `.smellfix.toml`

pub mod init;
pub mod refactor;

pub use refactor::{handle_refactor, RefactorConfig};
