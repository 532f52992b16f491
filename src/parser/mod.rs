//! Structural parsing capability.
//!
//! The rule engine does not build its own syntax tree; it consumes
//! function-definition facts extracted here with tree-sitter. Each fact
//! carries the declared name, starting line, ordered parameter list,
//! ordered default-value kinds, and the direct child statements of the
//! body that are single-target name assignments.

mod python;

pub use python::PythonParser;

/// Kind of a default-value expression, classified by its syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    List,
    Set,
    Dict,
    Other,
}

impl DefaultKind {
    /// List, set, and dict literals are the mutable default kinds.
    pub fn is_mutable(&self) -> bool {
        matches!(self, DefaultKind::List | DefaultKind::Set | DefaultKind::Dict)
    }
}

/// A declared parameter: name plus the line it appears on.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub line: usize,
}

/// A direct-child single-target assignment inside a function body.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub target: String,
    pub line: usize,
}

/// Facts about one function definition.
///
/// Parameters and defaults cover positional parameters only, matching the
/// argument list the naming and mutable-default rules inspect. Nested
/// functions yield their own facts.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    /// 1-indexed line of the `def` keyword.
    pub line: usize,
    pub params: Vec<Param>,
    pub defaults: Vec<DefaultKind>,
    pub assignments: Vec<Assignment>,
}

/// Parse Python source into function facts, in source order.
pub fn parse_functions(source: &str) -> anyhow::Result<Vec<FunctionDef>> {
    PythonParser::new().parse_functions(source)
}
