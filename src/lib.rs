//! Pepscan - PEP 8-style static checker for Python sources.
//!
//! Pepscan scans source files and reports style-rule violations with
//! fixed codes S001-S012. The core is the rule engine: a stateful
//! line-level scanner (S001-S008, carrying a blank-line run counter
//! across lines) combined with a tree-sitter-backed structural scanner
//! (S009-S012 on function definitions), producing a deterministic,
//! ordered list of findings per file.
//!
//! # Architecture
//!
//! - `source`: immutable source-file model (raw lines + full text)
//! - `parser`: structural facts extracted with tree-sitter-python
//! - `rules`: the rule engine - comment extraction, line scanner,
//!   structural scanner, and the per-file entry point
//! - `report`: output formatting (text, JSON)
//! - `cli`: argument parsing and file collection
//!
//! # Output ordering
//!
//! Findings for a line appear in rule-evaluation order, not numeric code
//! order, and are never re-sorted; see `rules::analyze_source`.

pub mod cli;
pub mod parser;
pub mod report;
pub mod rules;
pub mod source;

pub use parser::{parse_functions, Assignment, DefaultKind, FunctionDef, Param};
pub use rules::{
    analyze_file, analyze_files, analyze_source, AnalyzeError, FileReport, Finding, RuleCode,
};
pub use source::SourceFile;
