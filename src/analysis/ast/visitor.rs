//! Depth-first tree walking and the per-node finding visitors
use tree_sitter::Node;

use crate::analysis::ast::complexity::{cyclomatic_complexity, COMPLEXITY_THRESHOLD};
use crate::analysis::finding::{Category, Finding, Severity};
use crate::analysis::source::SourceText;

/// Visit every node under `root` in pre-order, children left to right.
///
/// Iterative with an explicit stack so deeply nested sources cannot overflow
/// the call stack.
pub fn walk_tree<'t, F>(root: Node<'t>, mut visit: F)
where
    F: FnMut(Node<'t>),
{
    let mut stack: Vec<Node<'t>> = vec![root];

    while let Some(node) = stack.pop() {
        visit(node);

        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            let mut children = Vec::new();
            loop {
                children.push(cursor.node());
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            // Reverse to maintain left-to-right traversal order
            stack.extend(children.into_iter().rev());
        }
    }
}

/// Per-node hook driven by [`walk_tree`]
pub trait TreeVisitor {
    fn visit_node(&mut self, node: Node<'_>);

    fn into_findings(self) -> Vec<Finding>;
}

/// Run a visitor over a whole tree and return what it collected
pub fn visit_tree<V: TreeVisitor>(root: Node<'_>, mut visitor: V) -> Vec<Finding> {
    walk_tree(root, |node| visitor.visit_node(node));
    visitor.into_findings()
}

/// Python rules: function complexity and catch-all exception handlers
pub struct PythonVisitor<'a> {
    source: &'a SourceText<'a>,
    findings: Vec<Finding>,
}

impl<'a> PythonVisitor<'a> {
    pub fn new(source: &'a SourceText<'a>) -> Self {
        Self {
            source,
            findings: Vec::new(),
        }
    }

    fn line_of(&self, node: &Node<'_>) -> usize {
        self.source.clamp_line(node.start_position().row + 1)
    }

    fn visit_function(&mut self, node: Node<'_>) {
        let complexity = cyclomatic_complexity(node);
        if complexity <= COMPLEXITY_THRESHOLD {
            return;
        }

        let name = node
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(self.source.raw().as_bytes()).ok())
            .unwrap_or("<anonymous>");
        let line = self.line_of(&node);

        self.findings.push(Finding::new(
            line,
            Severity::Medium,
            Category::Maintainability,
            "High Complexity Function",
            format!("Function '{}' has complexity {}", name, complexity),
            "Consider breaking down into smaller functions",
            self.source.line(line),
        ));
    }

    fn visit_except(&mut self, node: Node<'_>) {
        if !is_bare_except(&node) {
            return;
        }
        let line = self.line_of(&node);
        self.findings.push(Finding::new(
            line,
            Severity::Medium,
            Category::BestPractice,
            "Bare Except Clause",
            "Using bare 'except:' clause",
            "Specify exception types or use 'except Exception:'",
            self.source.line(line),
        ));
    }
}

impl TreeVisitor for PythonVisitor<'_> {
    fn visit_node(&mut self, node: Node<'_>) {
        match node.kind() {
            "function_definition" => self.visit_function(node),
            "except_clause" => self.visit_except(node),
            // Unused-variable detection is not implemented; bindings are accepted as-is.
            "assignment" | "augmented_assignment" => {}
            _ => {}
        }
    }

    fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// `except:` with no exception type: the keyword is followed directly by the colon
fn is_bare_except(node: &Node<'_>) -> bool {
    let mut cursor = node.walk();
    cursor.goto_first_child() && cursor.goto_next_sibling() && cursor.node().kind() == ":"
}

/// First syntax problem in depth-first order, as `(1-based line, message)`.
///
/// Besides ERROR and MISSING nodes this catches what the grammar recovers from
/// without an error node: a header with no indented body, Python 2 `print` and
/// `exec` statements, and statements out of line with their siblings. Error
/// nodes are reported ahead of those.
pub fn first_syntax_error(root: Node<'_>) -> Option<(usize, String)> {
    if root.has_error() {
        if let Some(found) = first_match(root, error_node) {
            return Some(found);
        }
    }
    first_match(root, recovered_error)
}

fn first_match<F>(root: Node<'_>, check: F) -> Option<(usize, String)>
where
    F: Fn(Node<'_>) -> Option<(usize, String)>,
{
    let mut found = None;
    walk_tree(root, |node| {
        if found.is_none() {
            found = check(node);
        }
    });
    found
}

fn error_node(node: Node<'_>) -> Option<(usize, String)> {
    let line = node.start_position().row + 1;
    if node.is_missing() {
        Some((line, format!("missing {}", node.kind())))
    } else if node.is_error() {
        Some((line, "invalid syntax".to_string()))
    } else {
        None
    }
}

/// Shapes the grammar accepts but Python rejects
fn recovered_error(node: Node<'_>) -> Option<(usize, String)> {
    let line = node.start_position().row + 1;
    match node.kind() {
        "print_statement" => Some((line, "missing parentheses in call to 'print'".to_string())),
        "exec_statement" => Some((line, "missing parentheses in call to 'exec'".to_string())),
        "module" => indentation_error(&statements(node), Some(0)),
        "block" => {
            let body = statements(node);
            if body.is_empty() {
                Some((empty_block_line(node), "expected an indented block".to_string()))
            } else {
                indentation_error(&body, None)
            }
        }
        _ => None,
    }
}

/// Named children minus comments
fn statements<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let body: Vec<Node<'t>> = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    body
}

/// The line after the header's colon, where the body should have started
fn empty_block_line(block: Node<'_>) -> usize {
    block
        .prev_sibling()
        .map(|colon| colon.end_position().row + 2)
        .unwrap_or(block.start_position().row + 1)
}

/// Every statement that starts its own line must sit at the column of the
/// first one (`expected` for the module). Statements sharing a line after `;`
/// are skipped.
fn indentation_error(body: &[Node<'_>], expected: Option<usize>) -> Option<(usize, String)> {
    let first = body.first()?;
    let column = expected.unwrap_or(first.start_position().column);
    let mut previous_end: Option<usize> = None;

    for stmt in body {
        let start = stmt.start_position();
        let starts_line = previous_end.map_or(true, |row| start.row > row);
        if starts_line && start.column != column {
            let message = if start.column > column {
                "unexpected indent"
            } else {
                "unindent does not match any outer indentation level"
            };
            return Some((start.row + 1, message.to_string()));
        }
        previous_end = Some(stmt.end_position().row);
    }
    None
}
