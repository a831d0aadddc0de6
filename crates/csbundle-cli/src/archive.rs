//! Output archive packing.
//!
//! One gzip tar stream bundling the editor tree, the extension packages,
//! and optional passthrough content. Generic over `Write` so the result
//! can land on disk or stay in memory for a direct upload.

use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};
use tar::Builder;

use crate::error::ArchiveError;

/// Top-level name of the editor tree inside the archive.
const EDITOR_ROOT: &str = "code-server";
/// Nested name of the extension-package directory inside the archive.
const EXTENSIONS_ROOT: &str = "code-server/extension_packages";

/// Describes what goes into one output archive.
#[derive(Debug, Clone)]
pub struct BundleArchive {
    editor_dir: PathBuf,
    extensions_dir: PathBuf,
    passthrough: Vec<PathBuf>,
}

impl BundleArchive {
    /// Creates an archive description over the two staging directories.
    pub fn new(editor_dir: impl Into<PathBuf>, extensions_dir: impl Into<PathBuf>) -> Self {
        Self {
            editor_dir: editor_dir.into(),
            extensions_dir: extensions_dir.into(),
            passthrough: Vec::new(),
        }
    }

    /// Adds a local file or directory included as-is at the archive root
    /// under its own name (e.g. `settings.json`, service definitions).
    pub fn passthrough(mut self, path: impl Into<PathBuf>) -> Self {
        self.passthrough.push(path.into());
        self
    }

    /// Streams the gzip tar into `writer`.
    ///
    /// Whatever exists in the source directories at this point is included,
    /// relative paths preserved under the renamed roots.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ArchiveError> {
        for required in [&self.editor_dir, &self.extensions_dir] {
            if !required.is_dir() {
                return Err(ArchiveError::MissingSource {
                    path: required.clone(),
                });
            }
        }

        let encoder = GzEncoder::new(writer, Compression::default());
        let mut builder = Builder::new(encoder);

        builder.append_dir_all(EDITOR_ROOT, &self.editor_dir)?;
        builder.append_dir_all(EXTENSIONS_ROOT, &self.extensions_dir)?;

        for path in &self.passthrough {
            let name = path
                .file_name()
                .ok_or_else(|| ArchiveError::MissingSource { path: path.clone() })?;
            if path.is_dir() {
                builder.append_dir_all(name, path)?;
            } else if path.is_file() {
                builder.append_path_with_name(path, name)?;
            } else {
                return Err(ArchiveError::MissingSource { path: path.clone() });
            }
        }

        builder.into_inner()?.finish()?;
        Ok(())
    }

    /// Materializes the archive at `path`.
    pub fn to_file(&self, path: &Path) -> Result<(), ArchiveError> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }

    /// Materializes the archive as an in-memory buffer.
    pub fn to_vec(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }
}

/// Archive filename embedding the architecture token and a UTC timestamp:
/// `code-server_{arch}_{YYYYMMDDHHMMSS}.tar.gz`.
pub fn archive_filename(architecture: &str, now: DateTime<Utc>) -> String {
    format!(
        "code-server_{}_{}.tar.gz",
        architecture,
        now.format("%Y%m%d%H%M%S")
    )
}
