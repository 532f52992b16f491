//! Comment extraction for line-level rules.
//!
//! Splits a raw line into an inline-comment payload and the code prefix.
//! The split happens on the *first* `#` in the line, with no attempt to
//! distinguish a `#` inside a string literal - a documented limitation
//! that produces occasional false negatives, not errors.

/// A line split at its first `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSplit<'a> {
    /// Comment text after the first `#`, trimmed of surrounding whitespace.
    /// Further `#` characters stay inside the payload.
    pub payload: String,
    /// Everything before the first `#`, untrimmed.
    pub code_prefix: &'a str,
}

/// Split a raw line into comment payload and code prefix.
///
/// Returns `None` when the line has no `#`, or when the trimmed payload is
/// empty. An empty payload behaves as "no comment" everywhere downstream:
/// the semicolon rule then sees the raw line and the blank-line rule still
/// does its bookkeeping.
pub fn split_comment(line: &str) -> Option<CommentSplit<'_>> {
    let hash = line.find('#')?;
    let payload = line[hash + 1..].trim();
    if payload.is_empty() {
        return None;
    }
    Some(CommentSplit {
        payload: payload.to_string(),
        code_prefix: &line[..hash],
    })
}
