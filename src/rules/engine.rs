//! Per-file rule engine: the entry point the file walker calls.
//!
//! Output ordering contract: findings appear in rule-evaluation order, not
//! numeric code order. Per line that is S001, S002, S003, the
//! comment-dependent S004/S005, the comment-absent S006, S007, S008, then
//! the structural findings attributed to that line. No re-sorting happens
//! afterwards; the emission order is the output order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::parser::parse_functions;
use crate::source::SourceFile;

use super::line::LineScanner;
use super::structural::StructuralScanner;
use super::types::FileReport;

/// Per-file analysis failure. One file failing does not stop the run;
/// remaining files are still analyzed.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Analyze one file from disk.
pub fn analyze_file(path: &Path) -> Result<FileReport, AnalyzeError> {
    let source = SourceFile::load(path).map_err(|e| AnalyzeError::Read {
        path: path.to_string_lossy().into_owned(),
        source: e,
    })?;
    analyze_source(&source)
}

/// Analyze an already-loaded source file.
///
/// The tree is parsed once up front; a parse failure is fatal for the
/// whole file and no line-level findings are emitted for it.
pub fn analyze_source(source: &SourceFile) -> Result<FileReport, AnalyzeError> {
    let functions = parse_functions(source.text()).map_err(|e| AnalyzeError::Parse {
        path: source.display_path(),
        message: e.to_string(),
    })?;
    let structural = StructuralScanner::new(functions);

    let mut scanner = LineScanner::new();
    let mut report = FileReport::new(source.display_path());

    for (idx, raw) in source.lines().iter().enumerate() {
        let line_no = idx + 1;
        for (code, message) in scanner.check(raw) {
            report.push(line_no, code, message);
        }
        for (at, code, message) in structural.check_line(line_no) {
            report.push(at, code, message);
        }
    }

    Ok(report)
}

/// Analyze many files, one rayon task per file.
///
/// Files share no state, so per-file analysis parallelizes freely; results
/// come back in input order, which the caller keeps lexicographic.
pub fn analyze_files(files: &[PathBuf]) -> Vec<Result<FileReport, AnalyzeError>> {
    files.par_iter().map(|path| analyze_file(path)).collect()
}
