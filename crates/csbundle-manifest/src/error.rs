//! Error types for manifest parsing and validation.

use thiserror::Error;

/// A validation error with a message and an optional manifest index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable error message.
    pub message: String,
    /// Index of the offending descriptor in the manifest, if applicable.
    pub index: Option<usize>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            index: None,
        }
    }

    /// Creates a new validation error pointing at a manifest entry.
    pub fn at_index(message: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            index: Some(index),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(index) = self.index {
            write!(f, "{} (at entry {})", self.message, index)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not valid JSON.
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed but failed validation.
    #[error("manifest validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),
}
