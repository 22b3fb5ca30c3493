//! Cyclomatic complexity over a function subtree
use tree_sitter::Node;

use crate::analysis::ast::visitor::walk_tree;

/// Functions above this complexity are reported
pub const COMPLEXITY_THRESHOLD: u32 = 10;

/// Nodes that open an additional execution path
const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "while_statement",
    "for_statement",
    "try_statement",
    "with_statement",
];

/// Binary `and`/`or` node; a chain of k operands parses as k-1 of these
const BOOLEAN_OPERATOR: &str = "boolean_operator";

/// Baseline 1, +1 per branch node, +(k-1) per boolean chain of k operands.
///
/// The whole subtree is walked, so nested function bodies count toward the
/// enclosing function as well.
pub fn cyclomatic_complexity(function: Node<'_>) -> u32 {
    let mut complexity = 1;
    walk_tree(function, |node| {
        let kind = node.kind();
        if BRANCH_KINDS.contains(&kind) || kind == BOOLEAN_OPERATOR {
            complexity += 1;
        }
    });
    complexity
}
