//! Error types for the bundle pipeline.
//!
//! Every error here is terminal for the run: the pipeline never retries a
//! stage and never produces a partial archive.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching extensions or the editor distribution.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connection, TLS, body decode).
    #[error("request for {resource} failed: {source}")]
    Request {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-2xx status.
    #[error("can't get {resource}: {url} returned status {status}")]
    Status {
        resource: String,
        url: String,
        status: reqwest::StatusCode,
    },

    /// No release asset name contains the requested architecture token.
    #[error("architecture {architecture} not found in release {release}")]
    ArchitectureNotFound {
        architecture: String,
        release: String,
    },

    /// More than one release asset name contains the architecture token.
    #[error("architecture {architecture} matches multiple assets in release {release}: {}", .candidates.join(", "))]
    AmbiguousArchitecture {
        architecture: String,
        release: String,
        candidates: Vec<String>,
    },

    /// The extracted asset did not contain the expected entry.
    #[error("extracted asset does not contain expected path {path}")]
    MissingExtracted { path: PathBuf },

    /// The asset's tar stream could not be extracted.
    #[error("failed to extract asset {asset}: {source}")]
    Extract {
        asset: String,
        #[source]
        source: std::io::Error,
    },

    /// A staging-directory write failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the branding customizer.
#[derive(Debug, Error)]
pub enum CustomizeError {
    /// A branding input or editor-tree file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON configuration file in the editor tree is malformed.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while packing the output archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A source directory named for inclusion does not exist.
    #[error("archive source {path} does not exist")]
    MissingSource { path: PathBuf },

    /// Writing the tar stream failed.
    #[error("failed to write archive: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while uploading to the object store.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The async runtime backing the S3 client could not start.
    #[error("failed to start upload runtime: {0}")]
    Runtime(std::io::Error),

    /// The archive payload could not be read for upload.
    #[error("failed to read archive {path}: {message}")]
    Payload { path: PathBuf, message: String },

    /// The PutObject call failed.
    #[error("failed to upload s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}
