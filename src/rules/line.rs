//! Line-level rules S001-S008.
//!
//! A single sequential pass over a file's lines, carrying `ScanState`
//! across iterations. The ordering is load-bearing: S006 depends on the
//! blank-line run accumulated over previous lines, not just the current
//! line.

use lazy_static::lazy_static;
use regex::Regex;

use super::comment::split_comment;
use super::types::RuleCode;

/// Maximum allowed line length in columns, terminator included.
pub const MAX_LINE_LENGTH: usize = 79;

/// Required indentation step.
const INDENT_WIDTH: usize = 4;

/// Longest allowed run of blank lines before a statement.
const BLANK_RUN_LIMIT: usize = 2;

lazy_static! {
    /// Keyword followed by exactly one space and a name token.
    static ref KEYWORD_SPACING: Regex = Regex::new(r"^\w+\s\S+").unwrap();

    /// Full class declaration with a CamelCase name of one or two
    /// capitalized segments and an optional parenthesized base class.
    /// Lines arrive with their terminator still attached, hence the `\n?`.
    static ref CLASS_DECL: Regex =
        Regex::new(r"^class +[A-Z][a-z]+([A-Z][a-z]+)?\(?([a-zA-Z]+)?\)?:\n?$").unwrap();

    /// First space-prefixed word after the `class` keyword.
    static ref CLASS_NAME: Regex = Regex::new(r" (\w+)").unwrap();
}

/// Mutable per-file state carried across line iterations.
///
/// Owned exclusively by one `LineScanner` for the duration of one file's
/// pass; never process-global, so multi-file analysis stays safe.
#[derive(Debug, Default)]
struct ScanState {
    /// Consecutive blank (non-comment) lines since the last non-blank line.
    blank_run: usize,
}

/// Stateful scanner applying S001-S008 to one file, top to bottom.
#[derive(Debug, Default)]
pub struct LineScanner {
    state: ScanState,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one raw line, terminator included, returning `(code, message)`
    /// pairs in the fixed rule-evaluation order: S001, S002, S003,
    /// comment-dependent S004/S005, comment-absent S006, then S007, S008.
    pub fn check(&mut self, raw: &str) -> Vec<(RuleCode, String)> {
        let mut out = Vec::new();

        // S001: raw length in columns, counting the terminator when the
        // line has one.
        if raw.chars().count() > MAX_LINE_LENGTH {
            out.push((RuleCode::TooLong, "Too long".to_string()));
        }

        // S002: indentation of non-blank lines.
        if !raw.trim().is_empty() {
            let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
            if indent % INDENT_WIDTH != 0 {
                out.push((
                    RuleCode::BadIndentation,
                    "Indentation is not a multiple of four".to_string(),
                ));
            }
        }

        let split = split_comment(raw);
        // Comment stripped when present; later rules see the code prefix.
        let code_line = split.as_ref().map_or(raw, |s| s.code_prefix);

        // S003: trailing semicolon on the code prefix.
        if code_line.trim().ends_with(';') {
            out.push((
                RuleCode::UnnecessarySemicolon,
                "Unnecessary semicolon".to_string(),
            ));
        }

        if let Some(split) = &split {
            // S004: full-line comments are exempt.
            if missing_comment_space(raw, &split.payload) {
                out.push((
                    RuleCode::MissingCommentSpace,
                    "At least two spaces required before inline comments".to_string(),
                ));
            }
            // S005: marker anywhere in the payload, case-insensitive.
            if split.payload.to_lowercase().contains("todo") {
                out.push((RuleCode::TodoFound, "TODO found".to_string()));
            }
        } else {
            // S006: a line carrying a comment never takes part in the
            // blank-run bookkeeping, even when its code prefix is blank.
            if raw.trim().is_empty() {
                self.state.blank_run += 1;
            } else {
                if self.state.blank_run > BLANK_RUN_LIMIT {
                    out.push((
                        RuleCode::ExcessBlankLines,
                        "More than two blank lines used before this line".to_string(),
                    ));
                }
                self.state.blank_run = 0;
            }
        }

        // S007: keyword spacing on the comment-stripped, left-trimmed line.
        let stripped = code_line.trim_start();
        let keyword = if stripped.starts_with("class") {
            Some("class")
        } else if stripped.starts_with("def") {
            Some("def")
        } else {
            None
        };
        if let Some(keyword) = keyword {
            if !KEYWORD_SPACING.is_match(stripped) {
                out.push((
                    RuleCode::ExcessKeywordSpaces,
                    format!("Too many spaces after '{}'", keyword),
                ));
            }
        }

        // S008: class naming on the comment-stripped line (not left-trimmed).
        if code_line.starts_with("class ") {
            let name = CLASS_NAME
                .captures(code_line)
                .and_then(|c| c.get(1))
                .map_or("", |m| m.as_str());
            if !CLASS_DECL.is_match(code_line) {
                out.push((
                    RuleCode::ClassNameNotCamelCase,
                    format!("Class name '{}' should be written CamelCase", name),
                ));
            }
        }

        out
    }
}

/// S004: check the two characters immediately preceding the `#` that
/// starts the comment.
///
/// The `#` is located as the last occurrence before the payload start.
/// When no `#` lands inside that search region, the fallback inspects the
/// line minus its final character instead.
fn missing_comment_space(line: &str, payload: &str) -> bool {
    if line.starts_with('#') {
        return false;
    }
    let chars: Vec<char> = line.chars().collect();
    let cut = chars.len().saturating_sub(payload.chars().count());
    match chars[..cut].iter().rposition(|&c| c == '#') {
        Some(p) => !(p >= 2 && chars[p - 1] == ' ' && chars[p - 2] == ' '),
        None => {
            let end = chars.len().saturating_sub(1);
            !(end >= 2 && chars[end - 1] == ' ' && chars[end - 2] == ' ')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(scanner: &mut LineScanner, line: &str) -> Vec<RuleCode> {
        scanner.check(line).into_iter().map(|(c, _)| c).collect()
    }

    #[test]
    fn test_s001_boundary_with_terminator() {
        let mut s = LineScanner::new();
        let ok = format!("{}\n", "x".repeat(78));
        let long = format!("{}\n", "x".repeat(79));
        assert!(!codes(&mut s, &ok).contains(&RuleCode::TooLong));
        assert!(codes(&mut s, &long).contains(&RuleCode::TooLong));
    }

    #[test]
    fn test_s001_boundary_on_final_unterminated_line() {
        let mut s = LineScanner::new();
        let ok: String = "x".repeat(79);
        let long: String = "x".repeat(80);
        assert!(!codes(&mut s, &ok).contains(&RuleCode::TooLong));
        assert!(codes(&mut s, &long).contains(&RuleCode::TooLong));
    }

    #[test]
    fn test_s002_indentation() {
        let mut s = LineScanner::new();
        assert!(codes(&mut s, "   x = 1").contains(&RuleCode::BadIndentation));
        assert!(!codes(&mut s, "    x = 1").contains(&RuleCode::BadIndentation));
        // Blank lines never trigger S002.
        assert!(!codes(&mut s, "   ").contains(&RuleCode::BadIndentation));
    }

    #[test]
    fn test_s003_semicolon_only_on_code_prefix() {
        let mut s = LineScanner::new();
        assert!(codes(&mut s, "x = 1;").contains(&RuleCode::UnnecessarySemicolon));
        assert!(codes(&mut s, "x = 1;  # note").contains(&RuleCode::UnnecessarySemicolon));
        assert!(!codes(&mut s, "x = 1  # note;").contains(&RuleCode::UnnecessarySemicolon));
    }

    #[test]
    fn test_s004_spacing() {
        let mut s = LineScanner::new();
        assert!(codes(&mut s, "x = 1 # one space").contains(&RuleCode::MissingCommentSpace));
        assert!(!codes(&mut s, "x = 1  # two spaces").contains(&RuleCode::MissingCommentSpace));
        // Full-line comments are exempt.
        assert!(!codes(&mut s, "# heading").contains(&RuleCode::MissingCommentSpace));
    }

    #[test]
    fn test_s004_window_shifts_with_terminator() {
        let mut s = LineScanner::new();
        // The terminator widens the search window by one column, so the
        // second hash of a doubled marker lands inside it.
        assert!(codes(&mut s, "a  ## b\n").contains(&RuleCode::MissingCommentSpace));
        assert!(!codes(&mut s, "a  ## b").contains(&RuleCode::MissingCommentSpace));
        assert!(!codes(&mut s, "x = 1  # two spaces\n").contains(&RuleCode::MissingCommentSpace));
        assert!(codes(&mut s, "x = 1 # one space\n").contains(&RuleCode::MissingCommentSpace));
    }

    #[test]
    fn test_s005_todo_case_insensitive() {
        let mut s = LineScanner::new();
        assert!(codes(&mut s, "x = 1  # ToDo: rename").contains(&RuleCode::TodoFound));
        assert!(!codes(&mut s, "x = 1  # done").contains(&RuleCode::TodoFound));
        // Only comments are searched.
        assert!(!codes(&mut s, "todo = 1").contains(&RuleCode::TodoFound));
    }

    #[test]
    fn test_s006_run_of_three_fires_once() {
        let mut s = LineScanner::new();
        assert!(codes(&mut s, "").is_empty());
        assert!(codes(&mut s, "").is_empty());
        assert!(codes(&mut s, "").is_empty());
        assert!(codes(&mut s, "x = 1").contains(&RuleCode::ExcessBlankLines));
        // Counter was reset; the next non-blank line is clean.
        assert!(!codes(&mut s, "y = 2").contains(&RuleCode::ExcessBlankLines));
    }

    #[test]
    fn test_s006_two_blanks_allowed() {
        let mut s = LineScanner::new();
        s.check("");
        s.check("");
        assert!(!codes(&mut s, "x = 1").contains(&RuleCode::ExcessBlankLines));
    }

    #[test]
    fn test_s006_comment_lines_take_no_part() {
        let mut s = LineScanner::new();
        s.check("");
        s.check("");
        s.check("");
        // A comment line takes no part in the bookkeeping, so the run
        // neither grows nor fires here.
        assert!(!codes(&mut s, "# note").contains(&RuleCode::ExcessBlankLines));
        assert!(codes(&mut s, "x = 1").contains(&RuleCode::ExcessBlankLines));
    }

    #[test]
    fn test_s007_keyword_spacing() {
        let mut s = LineScanner::new();
        let found = s.check("def  foo(x):");
        assert!(found
            .iter()
            .any(|(c, m)| *c == RuleCode::ExcessKeywordSpaces && m.contains("'def'")));
        assert!(!codes(&mut s, "def foo(x):").contains(&RuleCode::ExcessKeywordSpaces));
        let found = s.check("class  User:");
        assert!(found
            .iter()
            .any(|(c, m)| *c == RuleCode::ExcessKeywordSpaces && m.contains("'class'")));
    }

    #[test]
    fn test_s008_class_naming() {
        let mut s = LineScanner::new();
        let found = s.check("class myClass:");
        assert!(found
            .iter()
            .any(|(c, m)| *c == RuleCode::ClassNameNotCamelCase && m.contains("'myClass'")));
        assert!(!codes(&mut s, "class MyClass:").contains(&RuleCode::ClassNameNotCamelCase));
        assert!(!codes(&mut s, "class Person(Base):").contains(&RuleCode::ClassNameNotCamelCase));
        // A terminated declaration line is still well-formed.
        assert!(!codes(&mut s, "class MyClass:\n").contains(&RuleCode::ClassNameNotCamelCase));
        assert!(codes(&mut s, "class myClass:\n").contains(&RuleCode::ClassNameNotCamelCase));
    }

    #[test]
    fn test_rule_order_within_a_line() {
        let mut s = LineScanner::new();
        let pad = " ".repeat(75);
        let line = format!("{}x =1; # todo", pad);
        let found: Vec<RuleCode> = codes(&mut s, &line);
        assert_eq!(
            found,
            vec![
                RuleCode::TooLong,
                RuleCode::BadIndentation,
                RuleCode::UnnecessarySemicolon,
                RuleCode::MissingCommentSpace,
                RuleCode::TodoFound,
            ]
        );
    }
}
