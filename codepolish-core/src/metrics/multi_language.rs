//! Per-function cyclomatic complexity for C, C++ and Java
//!
//! Counts the classic branch points (`if`, loops, `case`, `catch`, ternaries,
//! `&&` and `||`) inside every function body. Syntax errors are tolerated:
//! tree-sitter recovers and the functions it still recognizes are measured.
//! No maintainability index is produced for these languages.

use tree_sitter::{Language, Node};

use super::syntax;
use super::{round2, MetricsResult};
use crate::{Error, Result};

/// Grammar-specific node kinds
struct Grammar {
    language: Language,
    function_kinds: &'static [&'static str],
    branch_kinds: &'static [&'static str],
}

fn grammar_for(extension: &str) -> Result<Grammar> {
    let grammar = match extension {
        "c" => Grammar {
            language: tree_sitter_c::language(),
            function_kinds: &["function_definition"],
            branch_kinds: &[
                "if_statement",
                "for_statement",
                "while_statement",
                "do_statement",
                "conditional_expression",
            ],
        },
        "cpp" | "h" | "hpp" => Grammar {
            language: tree_sitter_cpp::language(),
            function_kinds: &["function_definition"],
            branch_kinds: &[
                "if_statement",
                "for_statement",
                "for_range_loop",
                "while_statement",
                "do_statement",
                "catch_clause",
                "conditional_expression",
            ],
        },
        "java" => Grammar {
            language: tree_sitter_java::language(),
            function_kinds: &["method_declaration", "constructor_declaration"],
            branch_kinds: &[
                "if_statement",
                "for_statement",
                "enhanced_for_statement",
                "while_statement",
                "do_statement",
                "catch_clause",
                "ternary_expression",
            ],
        },
        other => {
            return Err(Error::UnsupportedLanguage(format!(
                "no complexity grammar for .{}",
                other
            )))
        }
    };
    Ok(grammar)
}

/// Analyze C, C++ or Java source code; `extension` selects the grammar
pub fn analyze(extension: &str, code: &str) -> Result<MetricsResult> {
    let grammar = grammar_for(extension)?;
    let tree = syntax::parse(grammar.language, code)?;
    let source = code.as_bytes();

    let mut complexities = Vec::new();
    syntax::visit(tree.root_node(), &mut |node| {
        if grammar.function_kinds.contains(&node.kind()) {
            complexities.push(1 + count_branches(node, &grammar, source));
        }
    });

    if complexities.is_empty() {
        return Ok(MetricsResult::empty());
    }

    let average = complexities.iter().sum::<usize>() as f64 / complexities.len() as f64;
    Ok(MetricsResult {
        maintainability_index: None,
        average_cyclomatic_complexity: Some(round2(average)),
    })
}

fn count_branches(node: Node<'_>, grammar: &Grammar, source: &[u8]) -> usize {
    let mut count = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if grammar.function_kinds.contains(&child.kind()) {
            continue;
        }
        if is_branch(child, grammar, source) {
            count += 1;
        }
        count += count_branches(child, grammar, source);
    }
    count
}

fn is_branch(node: Node<'_>, grammar: &Grammar, source: &[u8]) -> bool {
    match node.kind() {
        kind if grammar.branch_kinds.contains(&kind) => true,
        "binary_expression" => node
            .child_by_field_name("operator")
            .is_some_and(|op| matches!(op.kind(), "&&" | "||")),
        // C and C++: `default:` has no value
        "case_statement" => node.child_by_field_name("value").is_some(),
        // Java
        "switch_label" => syntax::text(node, source).trim_start().starts_with("case"),
        _ => false,
    }
}
