//! Python function-fact extraction using tree-sitter.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use super::{Assignment, DefaultKind, FunctionDef, Param};

/// Tree-sitter query for finding all function definitions, nested ones
/// included, in source order.
const FUNCTION_QUERY: &str = "(function_definition) @function";

pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse source and extract facts for every function definition.
    ///
    /// Fails when the source cannot be parsed at all or the tree carries
    /// syntax errors; structural rules are all-or-nothing per file.
    pub fn parse_functions(&self, source: &str) -> anyhow::Result<Vec<FunctionDef>> {
        let mut parser = self.create_parser()?;
        let bytes = source.as_bytes();
        let tree = parser
            .parse(bytes, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source"))?;
        if tree.root_node().has_error() {
            anyhow::bail!("syntax error in Python source");
        }

        let query = Query::new(&self.language, FUNCTION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), bytes);

        let mut functions: Vec<(usize, FunctionDef)> = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                functions.push((node.start_byte(), extract_function(node, bytes)));
            }
        }

        functions.sort_by_key(|(start, _)| *start);
        Ok(functions.into_iter().map(|(_, f)| f).collect())
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

fn extract_function(node: Node, source: &[u8]) -> FunctionDef {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();
    let line = node.start_position().row + 1;

    let mut params = Vec::new();
    let mut defaults = Vec::new();
    if let Some(param_list) = node.child_by_field_name("parameters") {
        extract_params(param_list, source, &mut params, &mut defaults);
    }

    let assignments = node
        .child_by_field_name("body")
        .map(|body| extract_assignments(body, source))
        .unwrap_or_default();

    FunctionDef {
        name,
        line,
        params,
        defaults,
        assignments,
    }
}

/// Walk the parameter list, collecting positional parameter names and the
/// kinds of their default values.
///
/// Parameters after a bare `*` are keyword-only and are skipped, as are
/// `*args` / `**kwargs`; the rules inspect the positional argument list
/// only.
fn extract_params(
    param_list: Node,
    source: &[u8],
    params: &mut Vec<Param>,
    defaults: &mut Vec<DefaultKind>,
) {
    let mut keyword_only = false;
    let mut cursor = param_list.walk();
    for child in param_list.named_children(&mut cursor) {
        match child.kind() {
            // Both a bare `*` and `*args` start the keyword-only section.
            "keyword_separator" | "list_splat_pattern" => keyword_only = true,
            _ if keyword_only => {}
            "identifier" => params.push(param_from(child, source)),
            "typed_parameter" => {
                let mut inner = child.walk();
                let ident = child
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "identifier");
                if let Some(ident) = ident {
                    params.push(param_from(ident, source));
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = child.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        params.push(param_from(name, source));
                    }
                }
                if let Some(value) = child.child_by_field_name("value") {
                    defaults.push(classify_default(value));
                }
            }
            _ => {}
        }
    }
}

fn param_from(ident: Node, source: &[u8]) -> Param {
    Param {
        name: node_text(ident, source),
        line: ident.start_position().row + 1,
    }
}

fn classify_default(value: Node) -> DefaultKind {
    match value.kind() {
        "list" => DefaultKind::List,
        "set" => DefaultKind::Set,
        "dictionary" => DefaultKind::Dict,
        _ => DefaultKind::Other,
    }
}

/// Collect direct child statements of the body that assign to a single
/// name. Chained assignments (`a = b = 1`) contribute their first target;
/// tuple targets are skipped.
fn extract_assignments(body: Node, source: &[u8]) -> Vec<Assignment> {
    let mut out = Vec::new();
    let mut cursor = body.walk();
    for stmt in body.named_children(&mut cursor) {
        if stmt.kind() != "expression_statement" {
            continue;
        }
        let Some(expr) = stmt.named_child(0) else {
            continue;
        };
        if expr.kind() != "assignment" {
            continue;
        }
        let Some(left) = expr.child_by_field_name("left") else {
            continue;
        };
        if left.kind() == "identifier" {
            out.push(Assignment {
                target: node_text(left, source),
                line: stmt.start_position().row + 1,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn functions(source: &str) -> Vec<FunctionDef> {
        PythonParser::new().parse_functions(source).unwrap()
    }

    #[test]
    fn test_extract_basic_function() {
        let funcs = functions("def hello(name, count):\n    pass\n");
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name, "hello");
        assert_eq!(funcs[0].line, 1);
        let names: Vec<&str> = funcs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "count"]);
        assert!(funcs[0].defaults.is_empty());
    }

    #[test]
    fn test_default_kinds() {
        let funcs = functions(
            "def f(a=[], b={}, c={1}, d=None, e=3):\n    pass\n",
        );
        assert_eq!(
            funcs[0].defaults,
            [
                DefaultKind::List,
                DefaultKind::Dict,
                DefaultKind::Set,
                DefaultKind::Other,
                DefaultKind::Other,
            ]
        );
    }

    #[test]
    fn test_keyword_only_params_skipped() {
        let funcs = functions("def f(a, *, b=[]):\n    pass\n");
        let names: Vec<&str> = funcs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a"]);
        assert!(funcs[0].defaults.is_empty());
    }

    #[test]
    fn test_splat_params_skipped() {
        let funcs = functions("def f(a, *args, **kwargs):\n    pass\n");
        let names: Vec<&str> = funcs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a"]);
    }

    #[test]
    fn test_typed_params() {
        let funcs = functions("def f(a: int, b: str = 'x'):\n    pass\n");
        let names: Vec<&str> = funcs[0].params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(funcs[0].defaults, [DefaultKind::Other]);
    }

    #[test]
    fn test_body_assignments_direct_children_only() {
        let source = "\
def f():
    top = 1
    if True:
        nested = 2
    other = top
";
        let funcs = functions(source);
        let targets: Vec<&str> = funcs[0]
            .assignments
            .iter()
            .map(|a| a.target.as_str())
            .collect();
        assert_eq!(targets, ["top", "other"]);
        assert_eq!(funcs[0].assignments[0].line, 2);
    }

    #[test]
    fn test_tuple_targets_skipped() {
        let funcs = functions("def f():\n    a, b = 1, 2\n    c = 3\n");
        let targets: Vec<&str> = funcs[0]
            .assignments
            .iter()
            .map(|a| a.target.as_str())
            .collect();
        assert_eq!(targets, ["c"]);
    }

    #[test]
    fn test_nested_functions_in_source_order() {
        let source = "\
def outer():
    def inner():
        pass
    return inner

def after():
    pass
";
        let funcs = functions(source);
        let names: Vec<&str> = funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["outer", "inner", "after"]);
        assert_eq!(funcs[1].line, 2);
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        assert!(PythonParser::new()
            .parse_functions("def broken(:\n")
            .is_err());
    }
}
