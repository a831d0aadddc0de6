//! Scoped staging area for a single bundle run.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Transient working area holding fetched and extracted content before
/// archiving.
///
/// The whole tree lives inside a [`TempDir`] and is removed when the value
/// is dropped, on success and on every failure path alike.
#[derive(Debug)]
pub struct Staging {
    root: TempDir,
    extensions: PathBuf,
    editor: PathBuf,
}

impl Staging {
    /// Creates the staging tree: `extensions/` and `editor/` under a fresh
    /// temporary directory.
    pub fn new() -> io::Result<Self> {
        let root = tempfile::tempdir()?;
        let extensions = root.path().join("extensions");
        let editor = root.path().join("editor");
        std::fs::create_dir(&extensions)?;
        std::fs::create_dir(&editor)?;
        Ok(Self {
            root,
            extensions,
            editor,
        })
    }

    /// Root of the staging tree. Scratch files (e.g. the archive before it
    /// is moved to its destination) go here.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Directory receiving one `.vsix` file per manifest entry.
    pub fn extensions_dir(&self) -> &Path {
        &self.extensions
    }

    /// Directory receiving the extracted editor distribution (or the single
    /// editor binary, depending on the extract mode).
    pub fn editor_dir(&self) -> &Path {
        &self.editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_creates_subdirs() {
        let staging = Staging::new().unwrap();
        assert!(staging.extensions_dir().is_dir());
        assert!(staging.editor_dir().is_dir());
        assert!(staging.extensions_dir().starts_with(staging.root()));
    }

    #[test]
    fn test_staging_removed_on_drop() {
        let path = {
            let staging = Staging::new().unwrap();
            std::fs::write(staging.extensions_dir().join("a.vsix"), b"x").unwrap();
            staging.root().to_path_buf()
        };
        assert!(!path.exists());
    }
}
