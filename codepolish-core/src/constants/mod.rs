//! Constants module for codepolish core
//!
//! Static lookup tables shared by the metrics analyzer, the executor client
//! and the tree walker.

pub mod languages;

pub use languages::{
    extension_of, is_supported_extension, language_for_path, piston_version, EXTENSION_LANGUAGES,
    PISTON_VERSIONS, SUPPORTED_EXTENSIONS,
};
