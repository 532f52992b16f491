//! Structural rules S009-S012 over function-definition facts.
//!
//! The file is parsed once and the facts are indexed by declared line; the
//! engine pulls each line's structural findings during that line's
//! iteration, so the output order matches a per-line tree walk.

use lazy_static::lazy_static;
use regex::Regex;

use crate::parser::FunctionDef;

use super::types::RuleCode;

/// Variable findings are attributed one line below the enclosing `def`,
/// never at the assignment's own line. Output compatibility depends on
/// this offset.
const VARIABLE_LINE_OFFSET: usize = 1;

lazy_static! {
    /// Lowercase letters and underscores, with at most one trailing
    /// digit-or-lowercase character.
    static ref SNAKE_CASE: Regex = Regex::new(r"^[a-z_]+[a-z_0-9]?$").unwrap();
}

fn is_snake_case(name: &str) -> bool {
    SNAKE_CASE.is_match(name)
}

/// Scanner over one file's function facts.
pub struct StructuralScanner {
    functions: Vec<FunctionDef>,
}

impl StructuralScanner {
    pub fn new(functions: Vec<FunctionDef>) -> Self {
        Self { functions }
    }

    /// Findings for functions declared at `line`, as `(report line, code,
    /// message)`.
    ///
    /// Per function the rules run in a fixed order: function name, then
    /// every argument name, then every body variable, then every mutable
    /// default. Functions sharing a declared line appear in source order.
    pub fn check_line(&self, line: usize) -> Vec<(usize, RuleCode, String)> {
        let mut out = Vec::new();
        for func in self.functions.iter().filter(|f| f.line == line) {
            if !is_snake_case(&func.name) {
                out.push((
                    func.line,
                    RuleCode::FunctionNameNotSnakeCase,
                    format!("Function name '{}' should be written snake_case", func.name),
                ));
            }
            for param in &func.params {
                if !is_snake_case(&param.name) {
                    // Attributed to the function's line, not the parameter's.
                    out.push((
                        func.line,
                        RuleCode::ArgumentNameNotSnakeCase,
                        format!("Argument name '{}' should be snake_case", param.name),
                    ));
                }
            }
            for assign in &func.assignments {
                if !is_snake_case(&assign.target) {
                    out.push((
                        func.line + VARIABLE_LINE_OFFSET,
                        RuleCode::VariableNameNotSnakeCase,
                        format!("Variable '{}' in function should be snake_case", assign.target),
                    ));
                }
            }
            for default in &func.defaults {
                if default.is_mutable() {
                    out.push((
                        func.line,
                        RuleCode::MutableDefaultArgument,
                        "Default argument value is mutable".to_string(),
                    ));
                }
            }
        }
        out
    }
}
