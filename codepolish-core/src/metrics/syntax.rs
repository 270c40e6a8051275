use tree_sitter::{Language, Node, Parser, Tree};

use crate::{Error, Result};

pub(crate) fn parse(language: Language, code: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| Error::Analysis(format!("Failed to set language: {}", e)))?;

    parser
        .parse(code, None)
        .ok_or_else(|| Error::Analysis("Parser produced no syntax tree".to_string()))
}

/// First error or missing node in document order
pub(crate) fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

pub(crate) fn text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Depth-first visit of every node below (and including) `node`
pub(crate) fn visit<'t, F>(node: Node<'t>, f: &mut F)
where
    F: FnMut(Node<'t>),
{
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, f);
    }
}
