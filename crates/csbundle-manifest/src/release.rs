//! Editor release metadata and asset selection.

use serde::Deserialize;

/// One downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// Numeric asset id used by the asset-download endpoint.
    pub id: u64,
    /// Asset filename (e.g. `code-server-3.0.0-linux-amd64.tar.gz`).
    pub name: String,
}

/// Release metadata as returned by the release-index endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release tag (e.g. `v3.0.0`).
    pub tag_name: String,
    /// Downloadable assets attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Failure modes of [`select_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSelectionError {
    /// No asset name contains the architecture token.
    NotFound,
    /// More than one asset name contains the architecture token.
    /// Carries the candidate asset names.
    Ambiguous(Vec<String>),
}

impl std::fmt::Display for AssetSelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetSelectionError::NotFound => write!(f, "no matching asset"),
            AssetSelectionError::Ambiguous(names) => {
                write!(f, "multiple matching assets: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for AssetSelectionError {}

/// Selects the unique asset whose name contains `architecture` as a
/// substring.
///
/// Zero matches or more than one match is an error; a release is expected
/// to carry exactly one build per platform token.
pub fn select_asset<'a>(
    release: &'a Release,
    architecture: &str,
) -> Result<&'a ReleaseAsset, AssetSelectionError> {
    let mut matches = release
        .assets
        .iter()
        .filter(|asset| asset.name.contains(architecture));

    let first = matches.next().ok_or(AssetSelectionError::NotFound)?;
    let rest: Vec<String> = matches.map(|asset| asset.name.clone()).collect();
    if !rest.is_empty() {
        let mut names = vec![first.name.clone()];
        names.extend(rest);
        return Err(AssetSelectionError::Ambiguous(names));
    }
    Ok(first)
}
