//! Error types for the extractor.
//!
//! Only fatal conditions are represented here. Unresolved edge endpoints and
//! node kinds outside an extractor's interest are absorbed by the extractors
//! themselves and surface as placeholder labels or log lines, never as errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// Input bytes are not valid under the exporter's legacy encoding.
    #[error("Failed to decode {} as {encoding}: invalid byte sequence", .path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Normalized document is not well-formed XML.
    #[error("XML parsing failed for {}: {source}", .path.display())]
    XmlMalformed {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Reading or writing a file failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Verification catalog could not be parsed.
    #[error("Invalid catalog {}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Verification option is not present in the catalog.
    #[error("Unknown verification option: '{0}'")]
    UnknownOption(String),

    /// Catalog option refers to a file group that is not declared.
    #[error("Option '{option}' refers to undeclared file group '{group}'")]
    UnknownGroup { option: String, group: String },
}

impl ExtractorError {
    /// Wrap an IO error, mapping `NotFound` onto [`ExtractorError::InputNotFound`].
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Path of the file the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InputNotFound { path }
            | Self::Decode { path, .. }
            | Self::XmlMalformed { path, .. }
            | Self::Io { path, .. }
            | Self::Catalog { path, .. } => Some(path),
            Self::Json(_) | Self::UnknownOption(_) | Self::UnknownGroup { .. } => None,
        }
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
