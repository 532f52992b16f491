//! The rule engine: line-level and structural style checks.

mod comment;
mod engine;
mod line;
mod structural;
mod types;

pub use comment::{split_comment, CommentSplit};
pub use engine::{analyze_file, analyze_files, analyze_source, AnalyzeError};
pub use line::{LineScanner, MAX_LINE_LENGTH};
pub use structural::StructuralScanner;
pub use types::{FileReport, Finding, RuleCode};
