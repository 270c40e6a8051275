//! Language lookup tables
//!
//! Plain mapping constants: file extension to language identifier, and
//! language identifier to the pinned Piston runtime version. The version table
//! has to track the runtimes installed on the public Piston instance.

use std::path::Path;

/// Extensions the tree walker hands to the pipeline (lowercase, without dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "cpp", "c", "h", "hpp", "java", "cs", "go", "rb", "rs", "html",
];

/// Extension to language identifier
pub const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("cpp", "cpp"),
    ("c", "c"),
    ("java", "java"),
    ("cs", "csharp"),
    ("rb", "ruby"),
    ("go", "go"),
    ("rs", "rust"),
    ("sh", "bash"),
    ("php", "php"),
];

/// Language identifier to pinned Piston runtime version
pub const PISTON_VERSIONS: &[(&str, &str)] = &[
    ("python", "3.10.0"),
    ("cpp", "10.2.0"),
    ("c", "10.2.0"),
    ("javascript", "18.15.0"),
    ("java", "15.0.2"),
    ("csharp", "10.0.0"),
    ("go", "1.20.3"),
    ("ruby", "3.2.2"),
    ("rust", "1.70.0"),
];

/// Lowercased extension of `path`, without the dot
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Language identifier for a file, derived from its extension
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let extension = extension_of(path)?;
    EXTENSION_LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| *language)
}

/// Pinned Piston version for a language identifier
pub fn piston_version(language: &str) -> Option<&'static str> {
    PISTON_VERSIONS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, version)| *version)
}

/// Whether the walker should process this file
pub fn is_supported_extension(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
