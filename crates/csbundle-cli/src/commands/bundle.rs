//! Bundle command implementation
//!
//! Runs the full pipeline: manifest → extension fetch → editor fetch →
//! optional branding → archive → optional publish.

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use csbundle_manifest::{validate_manifest, Endpoints, Manifest, ManifestError};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use crate::archive::{archive_filename, BundleArchive};
use crate::customize::{apply_branding, Branding};
use crate::fetch::{fetch_editor, fetch_extensions, ExtractMode};
use crate::publish::{publish, ArchivePayload, PublishTarget};
use crate::staging::Staging;

/// Parsed options for one bundle run.
#[derive(Debug)]
pub struct BundleParams<'a> {
    /// Path to the extension manifest file.
    pub manifest_path: &'a str,
    /// Release tag, or `latest`.
    pub release: &'a str,
    /// Architecture token matched against release asset names.
    pub architecture: &'a str,
    /// Local output directory; when absent and a bucket is set, the
    /// archive is uploaded from memory without touching disk.
    pub destination: Option<&'a str>,
    /// Remote bucket; publishing is skipped when absent.
    pub bucket: Option<&'a str>,
    /// Object-key prefix for publishing.
    pub key_prefix: &'a str,
    /// Attach a public-read ACL to the published object.
    pub public: bool,
    /// Extract the full editor tree instead of the single binary.
    pub full_tree: bool,
    /// Branding directory (enables the customizer; requires `full_tree`).
    pub branding: Option<&'a str>,
    /// Extra local files/directories bundled as-is at the archive root.
    pub include: &'a [String],
}

/// Run the bundle command.
///
/// # Returns
/// Exit code: 0 success, 1 manifest/configuration error, 2 pipeline error.
pub fn run(params: &BundleParams) -> Result<ExitCode> {
    let start = Instant::now();

    println!(
        "{} {}",
        "Loading manifest:".cyan().bold(),
        params.manifest_path
    );
    let manifest = match load_manifest(params.manifest_path) {
        Ok(manifest) => manifest,
        Err(err) => {
            report_manifest_error(&err);
            return Ok(ExitCode::from(1));
        }
    };
    println!(
        "  {} extension(s): {}",
        manifest.len(),
        manifest
            .iter()
            .map(|e| e.display_id())
            .collect::<Vec<_>>()
            .join(", ")
            .dimmed()
    );

    if params.branding.is_some() && !params.full_tree {
        eprintln!(
            "{} --branding requires --full-tree (the customizer operates on an extracted editor tree)",
            "error:".red().bold()
        );
        return Ok(ExitCode::from(1));
    }
    let branding = match params.branding {
        Some(dir) => match Branding::load(Path::new(dir)) {
            Ok(branding) => Some(branding),
            Err(err) => {
                eprintln!("{} {}", "error:".red().bold(), err);
                return Ok(ExitCode::from(1));
            }
        },
        None => None,
    };

    match execute(params, &manifest, branding.as_ref()) {
        Ok(()) => {
            println!(
                "{} in {:.1}s",
                "Bundle complete".green().bold(),
                start.elapsed().as_secs_f64()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            Ok(ExitCode::from(2))
        }
    }
}

/// The fallible pipeline stages. The staging area is dropped (and removed)
/// on every path out of this function.
fn execute(params: &BundleParams, manifest: &Manifest, branding: Option<&Branding>) -> Result<()> {
    let staging = Staging::new().context("failed to create staging directory")?;
    let endpoints = Endpoints::default();
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("csbundle/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    println!("{}", "Fetching extensions".cyan().bold());
    let fetched = fetch_extensions(&client, &endpoints, manifest, staging.extensions_dir())?;
    for (ext, path) in manifest.iter().zip(&fetched) {
        println!(
            "  {} {} {}",
            "✓".green(),
            ext,
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .dimmed()
        );
    }

    let mode = if params.full_tree {
        ExtractMode::Tree
    } else {
        ExtractMode::Binary
    };
    println!(
        "{} {} ({})",
        "Fetching editor release".cyan().bold(),
        params.release,
        params.architecture
    );
    let editor = fetch_editor(
        &client,
        &endpoints,
        params.release,
        params.architecture,
        mode,
        staging.editor_dir(),
    )?;
    println!(
        "  {} {} asset {}",
        "✓".green(),
        editor.release_tag,
        editor.asset_name.dimmed()
    );

    if let Some(branding) = branding {
        println!("{}", "Applying branding".cyan().bold());
        apply_branding(staging.editor_dir(), branding)?;
        println!("  {} {}", "✓".green(), branding.short_name);
    }

    let mut archive = BundleArchive::new(staging.editor_dir(), staging.extensions_dir());
    for path in params.include {
        archive = archive.passthrough(path);
    }
    let filename = archive_filename(params.architecture, Utc::now());

    let target = params.bucket.map(|bucket| PublishTarget {
        bucket: bucket.to_string(),
        key_prefix: params.key_prefix.to_string(),
        public: params.public,
    });

    match (&target, params.destination) {
        // Upload-only: keep the archive in memory, never touch disk.
        (Some(target), None) => {
            println!("{} {}", "Packing archive".cyan().bold(), filename);
            let bytes = archive.to_vec()?;
            println!("  {} {} bytes", "✓".green(), bytes.len());
            let key = publish(target, &filename, ArchivePayload::Buffer(bytes))?;
            println!(
                "{} s3://{}/{}",
                "Published".green().bold(),
                target.bucket,
                key
            );
        }
        (target, destination) => {
            let out_dir = Path::new(destination.unwrap_or("."));
            let out_path = out_dir.join(&filename);
            println!(
                "{} {}",
                "Packing archive".cyan().bold(),
                out_path.display()
            );
            // Pack inside the staging area first so a failed run leaves
            // nothing at the destination.
            let scratch_path = staging.root().join(&filename);
            archive.to_file(&scratch_path)?;
            persist(&scratch_path, &out_path)
                .with_context(|| format!("failed to write archive to {}", out_path.display()))?;
            println!("  {} {}", "✓".green(), out_path.display());

            if let Some(target) = target {
                let key = publish(target, &filename, ArchivePayload::File(out_path))?;
                println!(
                    "{} s3://{}/{}",
                    "Published".green().bold(),
                    target.bucket,
                    key
                );
            }
        }
    }

    Ok(())
}

fn load_manifest(path: &str) -> Result<Manifest, ManifestError> {
    let manifest = Manifest::load(Path::new(path))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

fn report_manifest_error(err: &ManifestError) {
    match err {
        ManifestError::ValidationFailed(errors) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            for error in errors {
                eprintln!("  {} {}", "✗".red(), error);
            }
        }
        other => eprintln!("{} {}", "error:".red().bold(), other),
    }
}

/// Moves the finished archive into place, falling back to copy+rename when
/// the destination is on a different filesystem.
///
/// The fallback copies to a `.partial` name next to the destination and
/// renames into place, so an interrupted copy never leaves a truncated
/// archive under the final name.
fn persist(from: &Path, to: &Path) -> std::io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    let mut partial_name = to.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    partial_name.push(".partial");
    let partial = to.with_file_name(partial_name);
    match std::fs::copy(from, &partial).and_then(|_| std::fs::rename(&partial, to)) {
        Ok(()) => std::fs::remove_file(from),
        Err(err) => {
            let _ = std::fs::remove_file(&partial);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ExitCode has no PartialEq; compare the debug renderings.
    fn code(c: ExitCode) -> String {
        format!("{:?}", c)
    }

    fn params(manifest_path: &str) -> BundleParams<'_> {
        BundleParams {
            manifest_path,
            release: "latest",
            architecture: "linux-amd64",
            destination: None,
            bucket: None,
            key_prefix: "releases",
            public: false,
            full_tree: false,
            branding: None,
            include: &[],
        }
    }

    #[test]
    fn test_missing_manifest_exits_1() {
        let exit = run(&params("/nonexistent/extensions.json")).unwrap();
        assert_eq!(code(exit), code(ExitCode::from(1)));
    }

    #[test]
    fn test_malformed_manifest_exits_1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extensions.json");
        std::fs::write(&path, "{not json").unwrap();
        let exit = run(&params(path.to_str().unwrap())).unwrap();
        assert_eq!(code(exit), code(ExitCode::from(1)));
    }

    #[test]
    fn test_invalid_manifest_entry_exits_1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extensions.json");
        std::fs::write(
            &path,
            r#"[{"publisher": "", "name": "python", "version": "1.0"}]"#,
        )
        .unwrap();
        let exit = run(&params(path.to_str().unwrap())).unwrap();
        assert_eq!(code(exit), code(ExitCode::from(1)));
    }

    #[test]
    fn test_branding_without_full_tree_exits_1() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extensions.json");
        std::fs::write(
            &path,
            r#"[{"publisher": "ms-python", "name": "python", "version": "2021.1.0"}]"#,
        )
        .unwrap();
        let mut params = params(path.to_str().unwrap());
        params.branding = Some("branding");
        let exit = run(&params).unwrap();
        assert_eq!(code(exit), code(ExitCode::from(1)));
    }

    #[test]
    fn test_persist_moves_archive() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.tar.gz");
        let to = dir.path().join("out/a.tar.gz");
        std::fs::create_dir(dir.path().join("out")).unwrap();
        std::fs::write(&from, b"archive").unwrap();

        persist(&from, &to).unwrap();

        assert_eq!(std::fs::read(&to).unwrap(), b"archive");
        assert!(!from.exists());
    }

    #[test]
    fn test_persist_failure_leaves_nothing_at_destination() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.tar.gz");
        std::fs::write(&from, b"archive").unwrap();
        let missing_dir = dir.path().join("no-such-dir");
        let to = missing_dir.join("a.tar.gz");

        assert!(persist(&from, &to).is_err());
        assert!(!to.exists());
        assert!(!missing_dir.exists());
    }
}
