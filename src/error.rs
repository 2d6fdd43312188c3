use std::path::PathBuf;
use thiserror::Error;

use crate::classes::ClassIndex;

/// The main error type for yoloremap operations.
#[derive(Debug, Error)]
pub enum RemapError {
    #[error("Failed to read class file {path}: {source}")]
    ClassFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse class list from {path}: {source}")]
    ClassFileYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read annotation file {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write annotation file {path}: {source}")]
    AnnotationWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to collect annotation files under {path}: {message}")]
    InputWalk { path: PathBuf, message: String },

    #[error("{path}:{line}: invalid class index '{token}'; expected non-negative integer")]
    MalformedAnnotationLine {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}:{line}: class index '{token}' is out of range")]
    ClassIndexOutOfRange {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}:{line}: class index {index} is not defined in the original class list")]
    UnknownSourceIndex {
        path: PathBuf,
        line: usize,
        index: ClassIndex,
    },

    #[error(
        "{path}:{line}: failed to remap class index {index} ('{name}'); \
         no class with that name in the target class list"
    )]
    UnmappableClass {
        path: PathBuf,
        line: usize,
        index: ClassIndex,
        name: String,
    },

    #[error("Failed to read confirmation answer: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("{failed} of {total} annotation file(s) could not be remapped")]
    BatchFailed { failed: usize, total: usize },
}

impl RemapError {
    /// Returns true for errors that abort only the current annotation file
    /// under the lenient batch policy.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            RemapError::MalformedAnnotationLine { .. }
                | RemapError::ClassIndexOutOfRange { .. }
                | RemapError::UnknownSourceIndex { .. }
                | RemapError::UnmappableClass { .. }
        )
    }
}
