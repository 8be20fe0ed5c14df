//! Error types for front-matter parsing and content loading

use thiserror::Error;

/// A malformed or incomplete front-matter block
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Start delimiter found with no matching end delimiter
    #[error("front-matter block is missing its closing delimiter")]
    UnterminatedBlock,

    /// A required key is absent (or empty, for `title`)
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The `date` value did not parse as a timestamp
    #[error("invalid date `{0}`")]
    InvalidDate(String),

    /// The block itself failed to deserialize (wrong types, bad syntax)
    #[error("invalid front-matter block: {0}")]
    InvalidBlock(String),
}

/// A per-document failure recorded during a load.
///
/// These are collected alongside the documents that did parse; a broken
/// document never aborts the siblings in the same load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read
    #[error("{source_path}: {error}")]
    Io {
        source_path: String,
        #[source]
        error: std::io::Error,
    },

    /// The document's front matter was malformed or incomplete
    #[error("{source_path}: {error}")]
    Metadata {
        source_path: String,
        #[source]
        error: MetadataError,
    },

    /// Two source entries resolved to the same identifier within one load
    #[error("duplicate source path `{source_path}`")]
    DuplicatePath { source_path: String },
}

impl LoadError {
    /// The source path the error belongs to, relative to the source dir
    pub fn source_path(&self) -> &str {
        match self {
            LoadError::Io { source_path, .. }
            | LoadError::Metadata { source_path, .. }
            | LoadError::DuplicatePath { source_path } => source_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display_includes_path() {
        let error = LoadError::Metadata {
            source_path: "posts/broken.md".to_string(),
            error: MetadataError::MissingField("date"),
        };
        assert_eq!(
            error.to_string(),
            "posts/broken.md: missing required field `date`"
        );
        assert_eq!(error.source_path(), "posts/broken.md");
    }

    #[test]
    fn test_duplicate_path_display() {
        let error = LoadError::DuplicatePath {
            source_path: "a.md".to_string(),
        };
        assert_eq!(error.to_string(), "duplicate source path `a.md`");
    }
}
