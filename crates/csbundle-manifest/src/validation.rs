//! Manifest validation.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::{ManifestError, ValidationError};
use crate::manifest::Manifest;

/// Regex pattern for marketplace identifiers (publisher and extension name).
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._-]*$";

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX
        .get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `id` is a well-formed marketplace identifier.
pub fn is_valid_identifier(id: &str) -> bool {
    identifier_regex().is_match(id)
}

/// Validates a parsed manifest.
///
/// Checks performed:
/// - every field is non-empty;
/// - publisher and name match the marketplace identifier pattern;
/// - version contains no path separators (it is substituted into a URL and
///   a filename);
/// - no duplicate (publisher, name, version) triples.
///
/// All errors are collected; the manifest is rejected as a whole.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), ManifestError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, ext) in manifest.iter().enumerate() {
        for (field, value) in [
            ("publisher", &ext.publisher),
            ("name", &ext.name),
            ("version", &ext.version),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::at_index(
                    format!("field '{}' must not be empty", field),
                    index,
                ));
            }
        }

        for (field, value) in [("publisher", &ext.publisher), ("name", &ext.name)] {
            if !value.is_empty() && !is_valid_identifier(value) {
                errors.push(ValidationError::at_index(
                    format!("field '{}' is not a valid identifier: '{}'", field, value),
                    index,
                ));
            }
        }

        if ext.version.contains('/') || ext.version.contains('\\') {
            errors.push(ValidationError::at_index(
                format!("version must not contain path separators: '{}'", ext.version),
                index,
            ));
        }

        if !seen.insert((ext.publisher.clone(), ext.name.clone(), ext.version.clone())) {
            errors.push(ValidationError::at_index(
                format!("duplicate extension: {}", ext),
                index,
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ManifestError::ValidationFailed(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ExtensionDescriptor;

    fn manifest(entries: &[(&str, &str, &str)]) -> Manifest {
        Manifest {
            extensions: entries
                .iter()
                .map(|(p, n, v)| ExtensionDescriptor::new(*p, *n, *v))
                .collect(),
        }
    }

    #[test]
    fn test_valid_manifest() {
        let m = manifest(&[
            ("ms-python", "python", "2021.1.0"),
            ("rust-lang", "rust-analyzer", "0.3.1"),
        ]);
        assert!(validate_manifest(&m).is_ok());
    }

    #[test]
    fn test_empty_manifest_is_valid() {
        assert!(validate_manifest(&Manifest::default()).is_ok());
    }

    #[test]
    fn test_empty_field_rejected() {
        let m = manifest(&[("ms-python", "", "2021.1.0")]);
        let err = validate_manifest(&m).unwrap_err();
        match err {
            ManifestError::ValidationFailed(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].index, Some(0));
                assert!(errors[0].message.contains("name"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_identifier_rejected() {
        let m = manifest(&[("ms python", "python", "1.0")]);
        assert!(validate_manifest(&m).is_err());
        let m = manifest(&[("../etc", "python", "1.0")]);
        assert!(validate_manifest(&m).is_err());
    }

    #[test]
    fn test_version_with_separator_rejected() {
        let m = manifest(&[("pub", "ext", "1.0/../../x")]);
        assert!(validate_manifest(&m).is_err());
    }

    #[test]
    fn test_duplicate_triple_rejected() {
        let m = manifest(&[
            ("ms-python", "python", "2021.1.0"),
            ("ms-python", "python", "2021.1.0"),
        ]);
        let err = validate_manifest(&m).unwrap_err();
        match err {
            ManifestError::ValidationFailed(errors) => {
                assert_eq!(errors[0].index, Some(1));
                assert!(errors[0].message.contains("duplicate"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_same_extension_different_versions_allowed() {
        let m = manifest(&[
            ("ms-python", "python", "2021.1.0"),
            ("ms-python", "python", "2021.2.0"),
        ]);
        assert!(validate_manifest(&m).is_ok());
    }

    #[test]
    fn test_identifier_pattern() {
        assert!(is_valid_identifier("ms-python"));
        assert!(is_valid_identifier("rust-lang"));
        assert!(is_valid_identifier("a.b_c-d"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("-leading-dash"));
        assert!(!is_valid_identifier("has space"));
    }
}
