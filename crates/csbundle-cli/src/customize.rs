//! Branding customizer for an extracted editor tree.
//!
//! Two independent, idempotent sub-operations: icon overwrite and JSON
//! name-field rewrite. Both operate on fixed relative paths inside the
//! tree and require the full distribution (extract mode `Tree`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CustomizeError;

/// Icon assets directory inside the editor tree.
const ICON_ASSETS_PATH: &str = "src/browser/media";
/// Product descriptor inside the editor tree.
const PRODUCT_JSON_PATH: &str = "lib/vscode/product.json";
/// Web-app manifest inside the editor tree.
const WEB_MANIFEST_PATH: &str = "src/browser/media/manifest.json";

/// Branding inputs: the two name constants plus a local icon directory.
///
/// The branding directory holds `branding.json` with the names and an
/// `icons/` subdirectory whose files replace the tree's icon assets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Branding {
    /// Short product name (e.g. shown in the title bar).
    pub short_name: String,
    /// Long product name (e.g. shown in about dialogs).
    pub long_name: String,
    /// Directory containing replacement icon files.
    #[serde(skip)]
    pub icon_dir: PathBuf,
}

impl Branding {
    /// Loads branding configuration from a directory containing
    /// `branding.json` and `icons/`.
    pub fn load(dir: &Path) -> Result<Self, CustomizeError> {
        let config_path = dir.join("branding.json");
        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| CustomizeError::Io {
                path: config_path.clone(),
                source,
            })?;
        let mut branding: Branding =
            serde_json::from_str(&contents).map_err(|source| CustomizeError::Json {
                path: config_path,
                source,
            })?;
        branding.icon_dir = dir.join("icons");
        Ok(branding)
    }
}

/// Product descriptor with the two rewritten fields explicit; everything
/// else round-trips untouched through `rest`.
#[derive(Debug, Serialize, Deserialize)]
struct ProductJson {
    #[serde(rename = "nameShort")]
    name_short: String,
    #[serde(rename = "nameLong")]
    name_long: String,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

/// Web-app manifest with the two rewritten fields explicit.
#[derive(Debug, Serialize, Deserialize)]
struct WebManifest {
    name: String,
    short_name: String,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

/// Applies branding to an extracted editor tree.
///
/// Copies every file from the icon directory over the tree's icon assets,
/// then rewrites the name fields in the product descriptor and the web-app
/// manifest. Missing files or malformed JSON abort; no fallback values are
/// substituted. Applying twice yields the same tree as applying once.
pub fn apply_branding(editor_dir: &Path, branding: &Branding) -> Result<(), CustomizeError> {
    copy_icons(&branding.icon_dir, &editor_dir.join(ICON_ASSETS_PATH))?;

    rewrite_json(&editor_dir.join(PRODUCT_JSON_PATH), |product: &mut ProductJson| {
        product.name_short = branding.short_name.clone();
        product.name_long = branding.long_name.clone();
    })?;
    rewrite_json(&editor_dir.join(WEB_MANIFEST_PATH), |manifest: &mut WebManifest| {
        manifest.short_name = branding.short_name.clone();
        manifest.name = branding.long_name.clone();
    })?;
    Ok(())
}

/// Copies every file in `icon_dir` into `target`, overwriting on filename
/// collision.
fn copy_icons(icon_dir: &Path, target: &Path) -> Result<(), CustomizeError> {
    let entries = std::fs::read_dir(icon_dir).map_err(|source| CustomizeError::Io {
        path: icon_dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| CustomizeError::Io {
            path: icon_dir.to_path_buf(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let dest = target.join(entry.file_name());
        std::fs::copy(entry.path(), &dest).map_err(|source| CustomizeError::Io {
            path: dest,
            source,
        })?;
    }
    Ok(())
}

/// Full deserialize/mutate/serialize roundtrip of one JSON file.
fn rewrite_json<T, F>(path: &Path, mutate: F) -> Result<(), CustomizeError>
where
    T: serde::de::DeserializeOwned + Serialize,
    F: FnOnce(&mut T),
{
    let contents = std::fs::read_to_string(path).map_err(|source| CustomizeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut value: T = serde_json::from_str(&contents).map_err(|source| CustomizeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    mutate(&mut value);
    let serialized =
        serde_json::to_string_pretty(&value).map_err(|source| CustomizeError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    std::fs::write(path, serialized).map_err(|source| CustomizeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
