//! Source files handed to the pipeline

use std::fs;
use std::path::{Path, PathBuf};

use codepolish_core::language_for_path;

/// A file read once at pipeline start and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as found by the walker
    pub path: PathBuf,
    /// Path relative to the input root
    pub relative_path: PathBuf,
    /// Raw text content
    pub content: String,
    /// Language identifier derived from the extension
    pub language: Option<&'static str>,
}

impl SourceFile {
    /// Read `path`, which must live under `input_root`
    pub fn load(path: &Path, input_root: &Path) -> crate::Result<Self> {
        let content = fs::read_to_string(path)?;
        let relative_path = path
            .strip_prefix(input_root)
            .map_err(|_| {
                crate::Error::PathOperation(format!(
                    "{} is not inside {}",
                    path.display(),
                    input_root.display()
                ))
            })?
            .to_path_buf();

        Ok(Self::new(path, relative_path, content))
    }

    pub fn new(path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = language_for_path(&path);
        Self {
            path,
            relative_path: relative_path.into(),
            content: content.into(),
            language,
        }
    }

    /// Name used for the report heading
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}
