// Test utility module for smellfix integration tests
#![allow(dead_code)]

use smellfix::{CodeSmellName, MethodModel, RefactoringStrategy};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const PATH: &str = "filePath";
pub const FALSE_PATH: &str = "falseFilePath";
pub const OTHER_FALSE_PATH: &str = "otherFalseFilePath";
pub const METHOD_NAME: &str = "getFigureDrawBounds";

pub fn long_method() -> MethodModel {
    MethodModel::new(METHOD_NAME).with_smell(CodeSmellName::LongMethod)
}

/// Extract-method stand-in: succeeds for `PATH`, fails everywhere else, and
/// remembers every call it receives.
#[derive(Debug, Default)]
pub struct StubExtractMethod {
    calls: Mutex<Vec<(PathBuf, MethodModel)>>,
}

impl StubExtractMethod {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(PathBuf, MethodModel)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == Path::new(path))
            .count()
    }
}

impl RefactoringStrategy for StubExtractMethod {
    fn smell(&self) -> CodeSmellName {
        CodeSmellName::LongMethod
    }

    fn name(&self) -> &str {
        "stub extract method"
    }

    fn refactor(&self, path: &Path, method: &MethodModel) -> anyhow::Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), method.clone()));
        Ok(path == Path::new(PATH))
    }
}
