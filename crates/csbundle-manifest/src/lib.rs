//! csbundle manifest library.
//!
//! Types, parsing, and validation for the extension manifest and the editor
//! release index. This crate performs no network I/O; the fetch pipeline
//! lives in `csbundle-cli`.
//!
//! # Example
//!
//! ```
//! use csbundle_manifest::{ExtensionDescriptor, Manifest, validate_manifest};
//!
//! let manifest = Manifest {
//!     extensions: vec![ExtensionDescriptor::new("ms-python", "python", "2021.1.0")],
//! };
//! assert!(validate_manifest(&manifest).is_ok());
//! assert_eq!(manifest.extensions[0].package_filename(), "ms-python.python.vsix");
//! ```

pub mod endpoints;
pub mod error;
pub mod manifest;
pub mod release;
pub mod validation;

// Re-export commonly used types at the crate root
pub use endpoints::Endpoints;
pub use error::{ManifestError, ValidationError};
pub use manifest::{ExtensionDescriptor, Manifest};
pub use release::{select_asset, AssetSelectionError, Release, ReleaseAsset};
pub use validation::{is_valid_identifier, validate_manifest};
