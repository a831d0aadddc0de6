//! Small filesystem helpers shared across the pipeline.

use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copies the contents of `src` into `dst`, preserving relative
/// paths. `dst` must already exist. Existing files are overwritten.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_dir_all_preserves_layout() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("a/b")).unwrap();
        std::fs::write(src.path().join("top.txt"), b"top").unwrap();
        std::fs::write(src.path().join("a/b/deep.txt"), b"deep").unwrap();

        copy_dir_all(src.path(), dst.path()).unwrap();

        assert_eq!(std::fs::read(dst.path().join("top.txt")).unwrap(), b"top");
        assert_eq!(
            std::fs::read(dst.path().join("a/b/deep.txt")).unwrap(),
            b"deep"
        );
    }

    #[test]
    fn test_copy_dir_all_overwrites() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("f"), b"new").unwrap();
        std::fs::write(dst.path().join("f"), b"old").unwrap();

        copy_dir_all(src.path(), dst.path()).unwrap();
        assert_eq!(std::fs::read(dst.path().join("f")).unwrap(), b"new");
    }
}
