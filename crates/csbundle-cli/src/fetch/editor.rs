//! Editor distribution fetching.
//!
//! Two phases: resolve the named release to an asset via the release index,
//! then stream-extract the asset's gzip tar into the staging area.

use csbundle_manifest::{select_asset, AssetSelectionError, Endpoints, Release};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::path::Path;
use tar::Archive;

use crate::error::FetchError;
use crate::fsutil::copy_dir_all;

/// Name of the editor binary inside an extracted release asset.
const EDITOR_BINARY: &str = "code-server";

/// What to place in the staging directory after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Copy only the `code-server` binary out of the extracted tree.
    Binary,
    /// Copy the entire extracted distribution tree.
    Tree,
}

/// Outcome of a successful editor fetch, for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFetch {
    /// Tag of the resolved release.
    pub release_tag: String,
    /// Name of the downloaded asset.
    pub asset_name: String,
}

/// Resolves `release` (a tag, or `latest`) against the release index,
/// selects the unique asset matching `architecture`, downloads it, and
/// extracts it into `dest` per `mode`.
pub fn fetch_editor(
    client: &Client,
    endpoints: &Endpoints,
    release: &str,
    architecture: &str,
    mode: ExtractMode,
    dest: &Path,
) -> Result<EditorFetch, FetchError> {
    let resource = format!("release {}", release);
    let url = endpoints.release_url(release);
    let response = client
        .get(&url)
        .send()
        .map_err(|source| FetchError::Request {
            resource: resource.clone(),
            source,
        })?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            resource,
            url,
            status: response.status(),
        });
    }
    let release_info: Release = response.json().map_err(|source| FetchError::Request {
        resource: resource.clone(),
        source,
    })?;

    let asset = select_asset(&release_info, architecture).map_err(|err| match err {
        AssetSelectionError::NotFound => FetchError::ArchitectureNotFound {
            architecture: architecture.to_string(),
            release: release.to_string(),
        },
        AssetSelectionError::Ambiguous(candidates) => FetchError::AmbiguousArchitecture {
            architecture: architecture.to_string(),
            release: release.to_string(),
            candidates,
        },
    })?;

    let resource = format!("asset {}", asset.id);
    let url = endpoints.asset_url(asset.id);
    let response = client
        .get(&url)
        .header(ACCEPT, "application/octet-stream")
        .send()
        .map_err(|source| FetchError::Request {
            resource: resource.clone(),
            source,
        })?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            resource,
            url,
            status: response.status(),
        });
    }

    // Extract into a scratch dir first; only the wanted entry moves on.
    let scratch = tempfile::tempdir().map_err(|source| FetchError::Extract {
        asset: asset.name.clone(),
        source,
    })?;
    Archive::new(GzDecoder::new(response))
        .unpack(scratch.path())
        .map_err(|source| FetchError::Extract {
            asset: asset.name.clone(),
            source,
        })?;

    // Release assets unpack to a single top-level directory named after the
    // asset minus its .tar.gz suffix.
    let stem = asset.name.strip_suffix(".tar.gz").unwrap_or(&asset.name);
    let extracted = scratch.path().join(stem);

    match mode {
        ExtractMode::Binary => {
            let binary = extracted.join(EDITOR_BINARY);
            if !binary.is_file() {
                return Err(FetchError::MissingExtracted { path: binary });
            }
            let target = dest.join(EDITOR_BINARY);
            std::fs::copy(&binary, &target).map_err(|source| FetchError::Io {
                path: target,
                source,
            })?;
        }
        ExtractMode::Tree => {
            if !extracted.is_dir() {
                return Err(FetchError::MissingExtracted { path: extracted });
            }
            copy_dir_all(&extracted, dest).map_err(|source| FetchError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(EditorFetch {
        release_tag: release_info.tag_name.clone(),
        asset_name: asset.name.clone(),
    })
}
