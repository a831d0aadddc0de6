//! Extension manifest types and loading.
//!
//! The manifest is a JSON array of descriptors, one per extension to bundle:
//!
//! ```json
//! [
//!   {"publisher": "ms-python", "name": "python", "version": "2021.1.0"}
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ManifestError;

/// Identifies one downloadable extension package.
///
/// Identity is the (publisher, name, version) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Marketplace publisher identifier (e.g. `ms-python`).
    pub publisher: String,
    /// Extension name within the publisher's namespace.
    pub name: String,
    /// Exact version to fetch.
    pub version: String,
}

impl ExtensionDescriptor {
    /// Creates a new descriptor.
    pub fn new(
        publisher: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Returns the staging filename for the fetched package:
    /// `{publisher}.{name}.vsix`.
    pub fn package_filename(&self) -> String {
        format!("{}.{}.vsix", self.publisher, self.name)
    }

    /// Returns the `publisher.name` display identifier used in logs.
    pub fn display_id(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}

impl std::fmt::Display for ExtensionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}@{}", self.publisher, self.name, self.version)
    }
}

/// The ordered list of extensions to bundle.
///
/// Order is irrelevant to correctness but preserved for logging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Descriptors in file order.
    pub extensions: Vec<ExtensionDescriptor>,
}

impl Manifest {
    /// Loads and parses a manifest from a JSON file.
    ///
    /// Fails if the file is absent or malformed. Performs no validation
    /// beyond JSON well-formedness; see [`crate::validation::validate_manifest`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Number of descriptors in the manifest.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Returns true if the manifest lists no extensions.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterates over the descriptors in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtensionDescriptor> {
        self.extensions.iter()
    }
}
