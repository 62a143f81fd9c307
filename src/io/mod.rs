pub mod output;

pub use output::{create_writer, OutputFormat, OutputWriter};

use crate::core::{Error, Result};
use crate::refactoring::MethodsByPath;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system("Failed to read file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system("Failed to write file", path, e))
}

/// Read the methods to refactor from a JSON document of the form
/// `{ "<path>": [ { "name": "...", "code_smells": ["long_method"] } ] }`.
pub fn load_methods(path: &Path) -> Result<MethodsByPath> {
    let contents = read_file(path)?;
    parse_methods(&contents)
}

pub fn parse_methods(contents: &str) -> Result<MethodsByPath> {
    Ok(serde_json::from_str(contents)?)
}
