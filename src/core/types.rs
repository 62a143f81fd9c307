use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents different types of code smells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeSmellName {
    LongMethod,
    LongParameterList,
    LargeClass,
    FeatureEnvy,
    DataClump,
    DeepNesting,
    DuplicateCode,
}

impl CodeSmellName {
    pub const ALL: [CodeSmellName; 7] = [
        CodeSmellName::LongMethod,
        CodeSmellName::LongParameterList,
        CodeSmellName::LargeClass,
        CodeSmellName::FeatureEnvy,
        CodeSmellName::DataClump,
        CodeSmellName::DeepNesting,
        CodeSmellName::DuplicateCode,
    ];

    /// Stable display name, used as the top-level key of a failure index.
    pub fn name(&self) -> &'static str {
        match self {
            CodeSmellName::LongMethod => "Long Method",
            CodeSmellName::LongParameterList => "Long Parameter List",
            CodeSmellName::LargeClass => "Large Class",
            CodeSmellName::FeatureEnvy => "Feature Envy",
            CodeSmellName::DataClump => "Data Clump",
            CodeSmellName::DeepNesting => "Deep Nesting",
            CodeSmellName::DuplicateCode => "Duplicate Code",
        }
    }

    /// Identifier used in JSON input and configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            CodeSmellName::LongMethod => "long_method",
            CodeSmellName::LongParameterList => "long_parameter_list",
            CodeSmellName::LargeClass => "large_class",
            CodeSmellName::FeatureEnvy => "feature_envy",
            CodeSmellName::DataClump => "data_clump",
            CodeSmellName::DeepNesting => "deep_nesting",
            CodeSmellName::DuplicateCode => "duplicate_code",
        }
    }
}

impl fmt::Display for CodeSmellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodeSmellName {
    type Err = String;

    /// Accepts either the snake_case key or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CodeSmellName::ALL
            .iter()
            .copied()
            .find(|smell| {
                smell.key().eq_ignore_ascii_case(trimmed)
                    || smell.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| format!("Unknown code smell: '{}'", s))
    }
}

/// A method together with the code smells detected on it.
///
/// Descriptors are created by the detection stage and owned by the caller.
/// The orchestrator removes a smell from `code_smells` in place once a
/// strategy has resolved it; everything else is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    #[serde(default)]
    pub code_smells: Vec<CodeSmellName>,
}

impl MethodModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code_smells: Vec::new(),
        }
    }

    /// Builder-style smell tagging. Duplicate tags are ignored.
    pub fn with_smell(mut self, smell: CodeSmellName) -> Self {
        if !self.has_smell(smell) {
            self.code_smells.push(smell);
        }
        self
    }

    pub fn has_smell(&self, smell: CodeSmellName) -> bool {
        self.code_smells.contains(&smell)
    }

    /// Remove a smell tag, returning whether it was present.
    pub fn remove_smell(&mut self, smell: CodeSmellName) -> bool {
        let before = self.code_smells.len();
        self.code_smells.retain(|s| *s != smell);
        self.code_smells.len() != before
    }

    pub fn has_smells(&self) -> bool {
        !self.code_smells.is_empty()
    }
}
