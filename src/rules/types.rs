//! Core types for style findings.

use serde::{Deserialize, Serialize};

/// Fixed rule codes S001-S012.
///
/// S001-S008 are line-level rules, S009-S012 are structural rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCode {
    #[serde(rename = "S001")]
    TooLong,
    #[serde(rename = "S002")]
    BadIndentation,
    #[serde(rename = "S003")]
    UnnecessarySemicolon,
    #[serde(rename = "S004")]
    MissingCommentSpace,
    #[serde(rename = "S005")]
    TodoFound,
    #[serde(rename = "S006")]
    ExcessBlankLines,
    #[serde(rename = "S007")]
    ExcessKeywordSpaces,
    #[serde(rename = "S008")]
    ClassNameNotCamelCase,
    #[serde(rename = "S009")]
    FunctionNameNotSnakeCase,
    #[serde(rename = "S010")]
    ArgumentNameNotSnakeCase,
    #[serde(rename = "S011")]
    VariableNameNotSnakeCase,
    #[serde(rename = "S012")]
    MutableDefaultArgument,
}

impl RuleCode {
    /// Numeric part of the code (1 for S001).
    pub fn number(&self) -> u16 {
        match self {
            RuleCode::TooLong => 1,
            RuleCode::BadIndentation => 2,
            RuleCode::UnnecessarySemicolon => 3,
            RuleCode::MissingCommentSpace => 4,
            RuleCode::TodoFound => 5,
            RuleCode::ExcessBlankLines => 6,
            RuleCode::ExcessKeywordSpaces => 7,
            RuleCode::ClassNameNotCamelCase => 8,
            RuleCode::FunctionNameNotSnakeCase => 9,
            RuleCode::ArgumentNameNotSnakeCase => 10,
            RuleCode::VariableNameNotSnakeCase => 11,
            RuleCode::MutableDefaultArgument => 12,
        }
    }

    /// Whether this rule runs on the syntax tree rather than raw lines.
    pub fn is_structural(&self) -> bool {
        self.number() >= 9
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{:03}", self.number())
    }
}

/// A single reported violation.
///
/// Findings are write-once values appended in emission order; they are
/// never deduplicated or merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub code: RuleCode,
    pub message: String,
}

impl Finding {
    /// Render in the canonical output format.
    pub fn render(&self) -> String {
        format!("{}: Line {}: {} {}", self.file, self.line, self.code, self.message)
    }
}

/// All findings for one analyzed file, in emission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, line: usize, code: RuleCode, message: impl Into<String>) {
        self.findings.push(Finding {
            file: self.path.clone(),
            line,
            code,
            message: message.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
