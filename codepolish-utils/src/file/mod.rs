//! File system helpers for the mirrored output tree

use std::fs;
use std::path::{Path, PathBuf};

/// Normalize a path lexically (removes `.` and resolves `..` segments)
pub fn normalize_path(path: &Path) -> PathBuf {
    path_clean::clean(path)
}

/// Map `file` (located under `input_root`) to the same relative location under
/// `output_root`.
pub fn mirror_path(input_root: &Path, file: &Path, output_root: &Path) -> crate::Result<PathBuf> {
    let relative = file.strip_prefix(input_root).map_err(|_| {
        crate::UtilError::PathOperation(format!(
            "{} is not inside {}",
            file.display(),
            input_root.display()
        ))
    })?;

    let relative = normalize_path(relative);
    if relative.is_absolute() || relative.starts_with("..") {
        return Err(crate::UtilError::PathOperation(format!(
            "Unsafe relative path: {}",
            relative.display()
        )));
    }

    Ok(output_root.join(relative))
}

/// Write `content` to `path`, creating parent directories as needed
pub fn save_file(path: &Path, content: &str) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
