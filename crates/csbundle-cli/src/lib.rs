//! csbundle CLI library.
//!
//! The bundle pipeline: fetch extension packages and an editor release into
//! a scoped staging area, optionally apply branding, pack everything into a
//! gzip tar archive, and optionally publish it to an object store.
//!
//! # Modules
//!
//! - [`fetch`]: extension and editor downloads
//! - [`customize`]: branding (icons + product/web-manifest names)
//! - [`archive`]: gzip tar packing
//! - [`publish`]: object-store upload
//! - [`staging`]: scoped staging directories
//! - [`commands`]: CLI command implementations

pub mod archive;
pub mod commands;
pub mod customize;
pub mod error;
pub mod fetch;
pub mod fsutil;
pub mod publish;
pub mod staging;

pub use archive::{archive_filename, BundleArchive};
pub use customize::{apply_branding, Branding};
pub use error::{ArchiveError, CustomizeError, FetchError, PublishError};
pub use fetch::{fetch_editor, fetch_extensions, EditorFetch, ExtractMode};
pub use publish::{publish, ArchivePayload, PublishTarget};
pub use staging::Staging;
