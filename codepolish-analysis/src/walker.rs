//! Input tree traversal
//!
//! Visits every file below the input directory in filesystem order, keeps the
//! supported extensions and runs the pipeline on each one with its output
//! path mirrored under the output directory. A failure on one file is logged
//! and the walk moves on.

use std::fs;
use std::path::{Path, PathBuf};

use codepolish_core::{is_supported_extension, CodeExecutor};
use codepolish_llm::TextGenerator;
use codepolish_utils::mirror_path;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::pipeline::{FileOutcome, FilePipeline};
use crate::report::ReportWriter;
use crate::source::SourceFile;

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub skipped: usize,
    pub analysis_failed: usize,
    /// Files that could not be read, saved or reported
    pub errors: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.completed + self.skipped + self.analysis_failed + self.errors
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Completed { .. } => self.completed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::AnalysisFailed { .. } | FileOutcome::RewriteAnalysisFailed { .. } => {
                self.analysis_failed += 1;
            }
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files: {} completed, {} skipped, {} analysis failures, {} errors",
            self.total(),
            self.completed,
            self.skipped,
            self.analysis_failed,
            self.errors
        )
    }
}

/// Review every supported file under `input_dir`.
///
/// The report is initialized once before the walk. When the output directory
/// lies inside the input directory it is left out of the walk; when both are
/// the same directory every file is still visited and rewritten in place.
pub async fn process_codebase<E, G>(
    input_dir: &Path,
    output_dir: &Path,
    focus: &str,
    pipeline: &FilePipeline<E, G>,
) -> crate::Result<RunSummary>
where
    E: CodeExecutor,
    G: TextGenerator,
{
    if !input_dir.is_dir() {
        return Err(crate::Error::InvalidInput(format!(
            "Input directory does not exist: {}",
            input_dir.display()
        )));
    }

    let report = ReportWriter::initialize(output_dir)?;
    let excluded_output = fs::canonicalize(output_dir).ok();
    info!(
        "Reviewing {} into {} (focus: {})",
        input_dir.display(),
        output_dir.display(),
        focus
    );

    let mut summary = RunSummary::default();

    // The root itself is never excluded
    let walker = WalkDir::new(input_dir).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || excluded_output.as_deref().map_or(true, |excluded| {
                fs::canonicalize(entry.path()).map_or(true, |path| path != excluded)
            })
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_supported_extension(path) {
            continue;
        }

        match process_entry(input_dir, output_dir, path, focus, pipeline, &report).await {
            Ok(outcome) => summary.record(&outcome),
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                summary.errors += 1;
            }
        }
    }

    info!("Review finished: {}", summary);
    Ok(summary)
}

async fn process_entry<E, G>(
    input_dir: &Path,
    output_dir: &Path,
    path: &Path,
    focus: &str,
    pipeline: &FilePipeline<E, G>,
    report: &ReportWriter,
) -> crate::Result<FileOutcome>
where
    E: CodeExecutor,
    G: TextGenerator,
{
    let output_path: PathBuf = mirror_path(input_dir, path, output_dir)?;
    let source = SourceFile::load(path, input_dir)?;
    pipeline.process(&source, &output_path, report, focus).await
}
