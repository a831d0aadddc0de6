//! Validate command implementation
//!
//! Parses and validates a manifest without any network access.

use anyhow::Result;
use colored::Colorize;
use csbundle_manifest::{validate_manifest, Manifest, ManifestError};
use std::path::Path;
use std::process::ExitCode;

/// Run the validate command.
///
/// # Returns
/// Exit code: 0 if the manifest parses and validates, 1 otherwise.
pub fn run(manifest_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating manifest:".cyan().bold(), manifest_path);

    let manifest = match Manifest::load(Path::new(manifest_path)) {
        Ok(manifest) => manifest,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            return Ok(ExitCode::from(1));
        }
    };

    match validate_manifest(&manifest) {
        Ok(()) => {
            for ext in manifest.iter() {
                println!("  {} {}", "✓".green(), ext);
            }
            println!(
                "{} {} extension(s)",
                "Manifest OK:".green().bold(),
                manifest.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(ManifestError::ValidationFailed(errors)) => {
            for error in &errors {
                eprintln!("  {} {}", "✗".red(), error);
            }
            eprintln!(
                "{} {} error(s)",
                "Manifest invalid:".red().bold(),
                errors.len()
            );
            Ok(ExitCode::from(1))
        }
        Err(other) => {
            eprintln!("{} {}", "error:".red().bold(), other);
            Ok(ExitCode::from(1))
        }
    }
}
