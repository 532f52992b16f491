//! Output formatting for pepscan results.
//!
//! Two formats:
//! - Pretty: one finding per line, `<path>: Line <n>: S<code> <message>`
//! - JSON: structured per-file report for programmatic consumption

use serde::{Deserialize, Serialize};

use crate::rules::{FileReport, Finding};

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub findings_total: usize,
    pub files: Vec<JsonFileReport>,
}

/// Per-file entry in the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonFileReport {
    pub path: String,
    pub findings: Vec<JsonFinding>,
}

/// One finding, with the code rendered in its 3-digit form.
#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    pub code: String,
    pub line: usize,
    pub message: String,
}

fn finding_to_json(f: &Finding) -> JsonFinding {
    JsonFinding {
        code: f.code.to_string(),
        line: f.line,
        message: f.message.clone(),
    }
}

/// Write findings in the canonical plain-text format, in emission order.
pub fn write_pretty(reports: &[FileReport]) {
    for report in reports {
        for finding in &report.findings {
            println!("{}", finding.render());
        }
    }
}

/// Build the JSON report structure.
pub fn build_json(path: &str, reports: &[FileReport]) -> JsonReport {
    let files: Vec<JsonFileReport> = reports
        .iter()
        .map(|r| JsonFileReport {
            path: r.path.clone(),
            findings: r.findings.iter().map(finding_to_json).collect(),
        })
        .collect();
    let findings_total = reports.iter().map(|r| r.findings.len()).sum();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: reports.len(),
        findings_total,
        files,
    }
}

/// Write the JSON report to stdout.
pub fn write_json(path: &str, reports: &[FileReport]) -> anyhow::Result<()> {
    let report = build_json(path, reports);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}
