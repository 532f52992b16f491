//! Source file model.

use std::path::{Path, PathBuf};

/// A loaded source file: the path it was opened from, its raw lines, and
/// the full text for structural parsing. Immutable once loaded; lives for
/// one analysis pass.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    lines: Vec<String>,
}

impl SourceFile {
    /// Read a file from disk. Decode failures surface as read errors.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(path, text))
    }

    /// Build from in-memory text (used by tests and the library API).
    ///
    /// CRLF is normalized to LF on the way in, the way a universal-newline
    /// text read would deliver it.
    pub fn from_text(path: &Path, text: String) -> Self {
        let text = text.replace("\r\n", "\n");
        let lines = text.split_inclusive('\n').map(str::to_string).collect();
        Self {
            path: path.to_path_buf(),
            text,
            lines,
        }
    }

    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Full text, for the structural parser.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw lines with their terminators preserved, in order. A final line
    /// without a trailing newline is kept as-is. Line length and comment
    /// spacing checks count the terminator, so it must stay.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
