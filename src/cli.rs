//! Command-line interface for pepscan.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::report;
use crate::rules;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// File extension the checker handles.
const SOURCE_EXTENSION: &str = "py";

/// PEP 8-style static checker for Python sources.
///
/// Scans a file or directory and reports style violations S001-S012:
/// line length, indentation, stray semicolons, comment spacing, TODO
/// markers, blank-line runs, keyword spacing, and naming conventions,
/// plus mutable default arguments.
#[derive(Parser)]
#[command(name = "pepscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Collect `.py` files directly inside a directory, in lexicographic
/// filename order. No recursion into subdirectories.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && has_source_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == SOURCE_EXTENSION)
        .unwrap_or(false)
}

/// Run the check.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    // Non-matching single files produce no output and no error.
    let files = if metadata.is_dir() {
        collect_files(&args.path)?
    } else if has_source_extension(&args.path) {
        vec![args.path.clone()]
    } else {
        Vec::new()
    };

    // Per-file failures are reported and the rest of the run continues.
    let mut reports = Vec::new();
    let mut failed = false;
    for result in rules::analyze_files(&files) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &reports)?,
        _ => report::write_pretty(&reports),
    }

    if failed {
        Ok(EXIT_ERROR)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
