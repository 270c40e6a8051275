//! Per-file review pipeline
//!
//! ```text
//! validate original ─fail─▶ report "Test Failed" (skipped)
//!        │
//! analyze original ─fail─▶ report analysis error
//!        │
//!     rewrite
//!        │
//! analyze rewritten ─fail─▶ save rewritten code, report summary + error
//!        │
//!  save rewritten code
//!        │
//! validate rewritten
//!        │
//!  report summary, test results and metrics
//! ```
//!
//! Only the pass/fail flag of the rewritten-code run reaches the report; its
//! diagnostic is logged.

use std::path::{Path, PathBuf};

use codepolish_core::{metrics, CodeExecutor, ExecutionOutcome, MetricsResult};
use codepolish_llm::{RewriteClient, TextGenerator};
use codepolish_utils::save_file;
use tracing::{info, warn};

use crate::report::{self, ReportEntry, ReportWriter};
use crate::source::SourceFile;

/// Terminal state reached for one file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The original code did not run; nothing else was attempted
    Skipped { diagnostic: String },
    /// Metrics for the original code could not be computed
    AnalysisFailed { error: String },
    /// Metrics for the rewritten code could not be computed; the rewrite was
    /// still saved
    RewriteAnalysisFailed { error: String, output_path: PathBuf },
    /// Every step ran
    Completed {
        original_metrics: MetricsResult,
        improved_metrics: MetricsResult,
        rewritten_run: ExecutionOutcome,
        output_path: PathBuf,
    },
}

impl FileOutcome {
    /// Whether a rewritten file was written to the output tree
    pub fn saved_output(&self) -> Option<&Path> {
        match self {
            Self::RewriteAnalysisFailed { output_path, .. } | Self::Completed { output_path, .. } => {
                Some(output_path)
            }
            Self::Skipped { .. } | Self::AnalysisFailed { .. } => None,
        }
    }
}

/// Runs the review steps for one file at a time
pub struct FilePipeline<E, G> {
    executor: E,
    rewriter: RewriteClient<G>,
}

impl<E, G> FilePipeline<E, G>
where
    E: CodeExecutor,
    G: TextGenerator,
{
    pub fn new(executor: E, rewriter: RewriteClient<G>) -> Self {
        Self { executor, rewriter }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn rewriter(&self) -> &RewriteClient<G> {
        &self.rewriter
    }

    /// Process one file, writing the rewrite to `output_path` and one section
    /// to `report`.
    ///
    /// Step failures end up in the report and the returned outcome; only I/O
    /// errors while saving or reporting are returned as `Err`.
    pub async fn process(
        &self,
        source: &SourceFile,
        output_path: &Path,
        report: &ReportWriter,
        focus: &str,
    ) -> crate::Result<FileOutcome> {
        info!("Processing file: {}", source.path.display());
        let entry = |body: String| ReportEntry::new(source.display_name(), focus, body);

        let original_run = self.executor.execute(source.language, &source.content).await;
        if !original_run.success {
            report.append(&entry(report::failed_original_body(&original_run.diagnostic)))?;
            warn!("Original code failed to run. Skipping improvement.");
            return Ok(FileOutcome::Skipped {
                diagnostic: original_run.diagnostic,
            });
        }

        let original_metrics = match metrics::analyze(&source.path, &source.content) {
            Ok(result) => result,
            Err(e) => {
                let error = format!("Syntax or analysis error in original code: {}", e);
                report.append(&entry(error.clone()))?;
                warn!("{}", error);
                return Ok(FileOutcome::AnalysisFailed { error });
            }
        };
        info!("Original Metrics: {}", original_metrics);

        let rewrite = self.rewriter.improve(&source.content, focus).await;

        let improved_metrics = match metrics::analyze(&source.path, &rewrite.code) {
            Ok(result) => result,
            Err(e) => {
                let error = format!("Syntax or analysis error in improved code: {}", e);
                save_file(output_path, &rewrite.code)?;
                report.append(&entry(format!("{}\n{}", rewrite.summary, error)))?;
                warn!("{}", error);
                return Ok(FileOutcome::RewriteAnalysisFailed {
                    error,
                    output_path: output_path.to_path_buf(),
                });
            }
        };
        info!("Improved Metrics: {}", improved_metrics);

        save_file(output_path, &rewrite.code)?;

        let rewritten_run = self.executor.execute(source.language, &rewrite.code).await;
        if !rewritten_run.success {
            warn!(
                "Rewritten code for {} failed to run: {}",
                source.path.display(),
                rewritten_run.diagnostic
            );
        }

        let body = report::completed_body(
            &rewrite.summary,
            original_run.success,
            rewritten_run.success,
            &original_metrics,
            &improved_metrics,
        );
        report.append(&entry(body))?;

        Ok(FileOutcome::Completed {
            original_metrics,
            improved_metrics,
            rewritten_run,
            output_path: output_path.to_path_buf(),
        })
    }
}
