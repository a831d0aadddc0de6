//! Extension package fetching.

use csbundle_manifest::{Endpoints, ExtensionDescriptor, Manifest};
use rayon::prelude::*;
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Fetches every extension listed in the manifest into `dest`.
///
/// Downloads run in parallel on the rayon pool; the first failure aborts
/// the run. On success, `dest` holds exactly one
/// `{publisher}.{name}.vsix` per descriptor and the written paths are
/// returned in manifest order.
///
/// The response body is written verbatim; no checksum verification is
/// performed.
pub fn fetch_extensions(
    client: &Client,
    endpoints: &Endpoints,
    manifest: &Manifest,
    dest: &Path,
) -> Result<Vec<PathBuf>, FetchError> {
    manifest
        .extensions
        .par_iter()
        .map(|ext| fetch_one(client, endpoints, ext, dest))
        .collect()
}

fn fetch_one(
    client: &Client,
    endpoints: &Endpoints,
    ext: &ExtensionDescriptor,
    dest: &Path,
) -> Result<PathBuf, FetchError> {
    let resource = format!("extension {}", ext.display_id());
    let url = endpoints.extension_url(&ext.publisher, &ext.name, &ext.version);

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

    let body = response.bytes().map_err(|source| FetchError::Request {
        resource: resource.clone(),
        source,
    })?;

    let path = dest.join(ext.package_filename());
    std::fs::write(&path, &body).map_err(|source| FetchError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
