//! Markdown review report
//!
//! One report file per output directory. The header is written once when the
//! file does not exist yet; every processed file then appends one section.
//! The file is reopened for each append, so no handle is held between files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use codepolish_core::{format_metric, MetricsResult};
use codepolish_utils::truncate_chars;
use tracing::debug;

/// Report file name inside the output directory
pub const REPORT_FILE_NAME: &str = "report.md";

/// Written once when the report is created
pub const REPORT_HEADER: &str = "# Code Review Report\n\n";

/// Longest diagnostic excerpt kept in a failure section
pub const MAX_DIAGNOSTIC_CHARS: usize = 500;

const PASSED: &str = "✅ Passed";
const FAILED: &str = "❌ Failed";
const SKIPPED: &str = "⏭️ Skipped";

/// One per-file section of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub file_name: String,
    pub focus: String,
    pub body: String,
}

impl ReportEntry {
    pub fn new(file_name: impl Into<String>, focus: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            focus: focus.into(),
            body: body.into(),
        }
    }

    /// Markdown for this section, including the trailing separator
    pub fn render(&self) -> String {
        format!(
            "## {}\n**Focus**: {}\n\n{}\n\n---\n\n",
            self.file_name,
            self.focus,
            self.body.trim()
        )
    }
}

/// Append-only writer for the shared report file
#[derive(Debug, Clone)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Open the report inside `output_dir`, writing the header if the file
    /// does not exist yet. An existing report is kept and appended to.
    pub fn initialize(output_dir: &Path) -> crate::Result<Self> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(REPORT_FILE_NAME);

        if !path.exists() {
            fs::write(&path, REPORT_HEADER)?;
            debug!("Created report {}", path.display());
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one section
    pub fn append(&self, entry: &ReportEntry) -> crate::Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        file.write_all(entry.render().as_bytes())?;
        Ok(())
    }
}

fn pass_marker(passed: bool) -> &'static str {
    if passed {
        PASSED
    } else {
        FAILED
    }
}

/// Section body for a file whose original code did not run
pub fn failed_original_body(diagnostic: &str) -> String {
    format!(
        "### ❌ Test Failed – Original Code Did Not Compile\n\n\
         **Test Results**\n\
         - Before Improvement: {FAILED}\n\
         - After Improvement: {SKIPPED}\n\n\
         **Reason:**\n\
         ```text\n\
         {}\n\
         ```\n\
         ⏭️ Skipped AI improvement due to code failure.\n",
        truncate_chars(diagnostic.trim(), MAX_DIAGNOSTIC_CHARS)
    )
}

/// Before/after execution results
pub fn test_results_block(original_passed: bool, rewritten_passed: bool) -> String {
    format!(
        "\n**Test Results**\n- Before Improvement: {}\n- After Improvement: {}\n",
        pass_marker(original_passed),
        pass_marker(rewritten_passed)
    )
}

/// Before → after metric lines.
///
/// A line is emitted only for metrics the original code has; an absent
/// rewritten value renders as `N/A`.
pub fn metrics_block(original: &MetricsResult, improved: &MetricsResult) -> String {
    let mut block = String::from("\n**Code Quality Metrics:**\n");

    if original.maintainability_index.is_some() {
        block.push_str(&format!(
            "- Maintainability Index: {} ➝ {}\n",
            format_metric(original.maintainability_index),
            format_metric(improved.maintainability_index)
        ));
    }
    if original.average_cyclomatic_complexity.is_some() {
        block.push_str(&format!(
            "- Avg. Cyclomatic Complexity: {} ➝ {}\n",
            format_metric(original.average_cyclomatic_complexity),
            format_metric(improved.average_cyclomatic_complexity)
        ));
    }

    block
}

/// Body for a file that went through the whole pipeline
pub fn completed_body(
    summary: &str,
    original_passed: bool,
    rewritten_passed: bool,
    original: &MetricsResult,
    improved: &MetricsResult,
) -> String {
    format!(
        "{}\n{}{}",
        summary,
        test_results_block(original_passed, rewritten_passed),
        metrics_block(original, improved)
    )
}
