//! Remote fetching: extension packages and the editor distribution.

pub mod editor;
pub mod extensions;

pub use editor::{fetch_editor, EditorFetch, ExtractMode};
pub use extensions::fetch_extensions;
