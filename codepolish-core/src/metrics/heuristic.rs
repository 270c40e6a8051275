//! Keyword heuristic for script files without a parser

use super::MetricsResult;

/// Substrings that mark a line as a branch point
const BRANCH_MARKERS: &[&str] = &["if", "else if", "for", "while", "case", "catch", "&&", "||"];

/// Estimate cyclomatic complexity by scanning lines.
///
/// Starts at 1 and adds 1 for every line containing at least one marker. The
/// match is a plain substring test, so identifiers such as `diff` or
/// `format` count as well.
pub fn estimate_js_metrics(code: &str) -> MetricsResult {
    let branch_lines = code
        .lines()
        .map(str::trim)
        .filter(|line| BRANCH_MARKERS.iter().any(|marker| line.contains(marker)))
        .count();

    MetricsResult {
        maintainability_index: None,
        average_cyclomatic_complexity: Some((1 + branch_lines) as f64),
    }
}
