//! Structured analysis for Python sources
//!
//! Cyclomatic complexity is computed per top-level function and method.
//! Nested functions are neither averaged on their own nor added to the
//! enclosing function's score. The maintainability
//! index uses the classic SEI formula with Halstead volume, total cyclomatic
//! complexity, logical lines and the comment percentage, where docstrings and
//! other standalone strings count as comment lines.

use std::collections::{BTreeSet, HashSet};

use tree_sitter::Node;

use super::syntax;
use super::{round2, MetricsResult};
use crate::{Error, Result};

/// Node kinds that add one decision point each
const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "conditional_expression",
    "for_statement",
    "while_statement",
    "except_clause",
    "for_in_clause",
    "if_clause",
    "boolean_operator",
    "assert_statement",
    "case_clause",
];

/// Statements whose `else` branch adds a decision point
const ELSE_BRANCH_PARENTS: &[&str] = &["for_statement", "while_statement", "try_statement"];

/// Node kinds whose unnamed children are Halstead operators
const OPERATOR_KINDS: &[&str] = &[
    "binary_operator",
    "unary_operator",
    "boolean_operator",
    "not_operator",
    "comparison_operator",
    "augmented_assignment",
];

/// Clause kinds counted as a logical line of their own
const CLAUSE_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "elif_clause",
    "else_clause",
    "except_clause",
    "finally_clause",
];

/// Analyze Python source code
pub fn analyze(code: &str) -> Result<MetricsResult> {
    let tree = syntax::parse(tree_sitter_python::language(), code)?;
    let root = tree.root_node();

    if let Some(node) = syntax::first_error(root) {
        let position = node.start_position();
        return Err(Error::Parse(format!(
            "invalid syntax at line {}, column {}",
            position.row + 1,
            position.column + 1
        )));
    }

    let source = code.as_bytes();
    let functions = function_complexities(root);
    let average = if functions.is_empty() {
        0.0
    } else {
        functions.iter().sum::<usize>() as f64 / functions.len() as f64
    };

    let total_complexity = 1 + count_decisions(root) + functions.iter().sum::<usize>();
    let raw = RawMetrics::collect(root, code);
    let volume = halstead_volume(root, source);
    let maintainability = maintainability_index(volume, total_complexity, raw.logical_lines, raw.comment_percent());

    Ok(MetricsResult {
        maintainability_index: Some(round2(maintainability)),
        average_cyclomatic_complexity: Some(round2(average)),
    })
}

/// Complexity of every function and method that is not nested in another
/// function
fn function_complexities(root: Node<'_>) -> Vec<usize> {
    let mut complexities = Vec::new();
    syntax::visit(root, &mut |node| {
        if node.kind() == "function_definition" && !is_nested_function(node) {
            complexities.push(1 + count_decisions(node));
        }
    });
    complexities
}

fn is_nested_function(node: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "function_definition" {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

/// Decision points below `node`, not descending into nested functions
fn count_decisions(node: Node<'_>) -> usize {
    let mut count = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "function_definition" {
            continue;
        }
        if DECISION_KINDS.contains(&child.kind()) || is_loop_or_try_else(child) {
            count += 1;
        }
        count += count_decisions(child);
    }
    count
}

fn is_loop_or_try_else(node: Node<'_>) -> bool {
    node.kind() == "else_clause"
        && node
            .parent()
            .is_some_and(|parent| ELSE_BRANCH_PARENTS.contains(&parent.kind()))
}

fn halstead_volume(root: Node<'_>, source: &[u8]) -> f64 {
    let mut operators: HashSet<&str> = HashSet::new();
    let mut operands: HashSet<&str> = HashSet::new();
    let mut total_operators = 0usize;
    let mut total_operands = 0usize;

    syntax::visit(root, &mut |node| {
        if !OPERATOR_KINDS.contains(&node.kind()) {
            return;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let text = syntax::text(child, source);
            if child.is_named() {
                operands.insert(text);
                total_operands += 1;
            } else {
                operators.insert(text);
                total_operators += 1;
            }
        }
    });

    let vocabulary = operators.len() + operands.len();
    let length = total_operators + total_operands;
    if vocabulary == 0 {
        return 0.0;
    }
    length as f64 * (vocabulary as f64).log2()
}

fn maintainability_index(volume: f64, complexity: usize, logical_lines: usize, comment_percent: f64) -> f64 {
    if volume <= 0.0 || logical_lines == 0 {
        return 100.0;
    }

    let volume_scale = volume.ln();
    let lines_scale = (logical_lines as f64).ln();
    let comments_scale = (2.46 * comment_percent.to_radians()).sqrt();

    let raw = 171.0 - 5.2 * volume_scale - 0.23 * complexity as f64 - 16.2 * lines_scale
        + 50.0 * comments_scale.sin();

    (raw * 100.0 / 171.0).clamp(0.0, 100.0)
}

/// Line counts needed by the maintainability index
#[derive(Debug, Default)]
struct RawMetrics {
    source_lines: usize,
    comment_lines: usize,
    logical_lines: usize,
}

impl RawMetrics {
    fn collect(root: Node<'_>, code: &str) -> Self {
        let mut comment_rows: BTreeSet<usize> = BTreeSet::new();
        let mut string_rows: BTreeSet<usize> = BTreeSet::new();
        let mut logical_lines = 0;

        syntax::visit(root, &mut |node| {
            let kind = node.kind();
            if kind == "comment" {
                comment_rows.insert(node.start_position().row);
            } else if kind == "expression_statement" && is_standalone_string(node) {
                string_rows.extend(node.start_position().row..=node.end_position().row);
            }

            if node.is_named() && (kind.ends_with("_statement") || CLAUSE_KINDS.contains(&kind)) {
                logical_lines += 1;
            }
        });

        let mut source_lines = 0;
        for (row, line) in code.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || string_rows.contains(&row) {
                continue;
            }
            source_lines += 1;
        }

        Self {
            source_lines,
            comment_lines: comment_rows.union(&string_rows).count(),
            logical_lines,
        }
    }

    fn comment_percent(&self) -> f64 {
        if self.source_lines == 0 {
            return 0.0;
        }
        self.comment_lines as f64 / self.source_lines as f64 * 100.0
    }
}

/// Docstring-style statement: a string literal on its own
fn is_standalone_string(node: Node<'_>) -> bool {
    node.named_child_count() == 1
        && node
            .named_child(0)
            .is_some_and(|child| matches!(child.kind(), "string" | "concatenated_string"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trivial_function() {
        let metrics = analyze("def f():\n    return 1\n").unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(1.0));
        assert_eq!(metrics.maintainability_index, Some(100.0));
    }

    #[test]
    fn test_branches_raise_complexity() {
        let code = r#"
def classify(n, flag):
    if n > 0 and flag:
        return "pos"
    elif n < 0:
        return "neg"
    for i in range(n):
        pass
    return "zero"
"#;
        let metrics = analyze(code).unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(5.0));
    }

    #[test]
    fn test_average_over_functions() {
        let code = r#"
class Greeter:
    def hello(self):
        return "hi"

    def pick(self, items):
        return [x for x in items if x]
"#;
        // hello: 1, pick: 1 + for_in_clause + if_clause = 3
        let metrics = analyze(code).unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(2.0));
    }

    #[test]
    fn test_module_without_functions() {
        let metrics = analyze("x = 1 + 2\nprint(x)\n").unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(0.0));
        let mi = metrics.maintainability_index.unwrap();
        assert!((0.0..=100.0).contains(&mi));
    }

    #[test]
    fn test_maintainability_drops_with_complexity() {
        let simple = "def f(a, b):\n    return a + b\n";
        let branchy = r#"
def f(a, b, c):
    total = a + b * c - a / b
    if a > b and b > c or c > a:
        total += a
    elif a == b:
        total -= b
    while total > 100:
        total = total // 2
    for i in range(c):
        if i % 2 == 0:
            total += i
        else:
            total -= i
    return total if total > 0 else -total
"#;
        let simple_mi = analyze(simple).unwrap().maintainability_index.unwrap();
        let branchy_mi = analyze(branchy).unwrap().maintainability_index.unwrap();
        assert!(branchy_mi < simple_mi, "{} should be below {}", branchy_mi, simple_mi);
    }

    #[test]
    fn test_docstrings_count_as_comments() {
        let code = "def f(a):\n    \"\"\"Add one.\n\n    Long description.\n    \"\"\"\n    return a + 1\n";
        let tree = syntax::parse(tree_sitter_python::language(), code).unwrap();
        let raw = RawMetrics::collect(tree.root_node(), code);
        assert_eq!(raw.comment_lines, 4);
        assert_eq!(raw.source_lines, 2);
    }

    #[test]
    fn test_nested_functions_are_not_averaged() {
        let code = r#"
def outer(x):
    def inner():
        if x:
            return 1
        return 0
    return inner()
"#;
        let metrics = analyze(code).unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(1.0));
    }

    #[test]
    fn test_loop_and_try_else_add_decisions() {
        let code = r#"
def search(items, target):
    for item in items:
        if item == target:
            break
    else:
        return None
    try:
        value = int(target)
    except ValueError:
        value = 0
    else:
        value += 1
    return value
"#;
        // 1 + for + if + for-else + except + try-else
        let metrics = analyze(code).unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(6.0));
    }

    #[test]
    fn test_if_else_adds_nothing() {
        let code = "def f(a):\n    if a:\n        return 1\n    else:\n        return 2\n";
        let metrics = analyze(code).unwrap();
        assert_eq!(metrics.average_cyclomatic_complexity, Some(2.0));
    }

    #[test]
    fn test_syntax_error() {
        let err = analyze("def broken(:\n    pass\n").unwrap_err();
        assert!(err.to_string().contains("invalid syntax"));
    }
}
