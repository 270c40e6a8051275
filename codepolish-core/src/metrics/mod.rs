//! Code quality metrics
//!
//! Computes a maintainability/complexity summary for a piece of code. The
//! strategy is picked from the file extension:
//!
//! - Python: full structured analysis (cyclomatic complexity per function and
//!   a maintainability index)
//! - C, C++, Java: per-function cyclomatic complexity from the tree-sitter
//!   grammars; no maintainability index
//! - JavaScript: line-based keyword heuristic
//! - anything else: no metrics

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::constants::extension_of;
use crate::Result;

pub mod heuristic;
pub mod multi_language;
pub mod python;

mod syntax;

pub use heuristic::estimate_js_metrics;

/// Metrics for one version of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub maintainability_index: Option<f64>,
    pub average_cyclomatic_complexity: Option<f64>,
}

impl MetricsResult {
    /// Both fields absent
    pub fn empty() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for MetricsResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "maintainability_index={}, average_cyclomatic_complexity={}",
            format_metric(self.maintainability_index),
            format_metric(self.average_cyclomatic_complexity)
        )
    }
}

/// Render a metric with two decimals, or `N/A` when absent
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "N/A".to_string(),
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Analyze `code`, choosing the strategy from the extension of `path`.
///
/// The path is only used for dispatch; the file is never read.
pub fn analyze(path: &Path, code: &str) -> Result<MetricsResult> {
    let extension = extension_of(path).unwrap_or_default();
    debug!("Analyzing metrics for {} (extension {:?})", path.display(), extension);

    match extension.as_str() {
        "py" => python::analyze(code),
        "c" | "cpp" | "h" | "hpp" | "java" => multi_language::analyze(&extension, code),
        "js" => Ok(estimate_js_metrics(code)),
        _ => Ok(MetricsResult::empty()),
    }
}
