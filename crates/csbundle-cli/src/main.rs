//! csbundle CLI - builds redistributable code-server bundles
//!
//! This binary fetches a set of marketplace extensions and a code-server
//! release, packs them into a gzip tar archive, and optionally publishes
//! the archive to an S3 bucket.

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

use csbundle_cli::commands;
use csbundle_cli::commands::bundle::BundleParams;

/// csbundle - code-server bundle builder
#[derive(Parser)]
#[command(name = "csbundle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Supported target platform tokens, matched as substrings against release
/// asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Arch {
    /// Linux on x86-64 (glibc)
    LinuxAmd64,
    /// Linux on 64-bit ARM
    LinuxArm64,
    /// macOS on x86-64
    MacosAmd64,
    /// Alpine Linux on x86-64 (musl)
    AlpineAmd64,
}

impl Arch {
    /// Returns the token as it appears in release asset names.
    fn token(&self) -> &'static str {
        match self {
            Arch::LinuxAmd64 => "linux-amd64",
            Arch::LinuxArm64 => "linux-arm64",
            Arch::MacosAmd64 => "macos-amd64",
            Arch::AlpineAmd64 => "alpine-amd64",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch extensions and a code-server release, pack them into an
    /// archive, and optionally publish it
    Bundle {
        /// Path to the JSON manifest listing extensions to include
        manifest: String,

        /// code-server release tag (or "latest")
        #[arg(long, default_value = "latest")]
        release: String,

        /// Target platform for the code-server binary
        #[arg(long, value_enum, default_value = "linux-amd64")]
        arch: Arch,

        /// Local directory to write the archive to (default: current
        /// directory; with --bucket and no --destination the archive is
        /// uploaded from memory only)
        #[arg(long)]
        destination: Option<String>,

        /// S3 bucket to publish the archive to (publishing skipped when
        /// absent)
        #[arg(long)]
        bucket: Option<String>,

        /// Object-key prefix used when publishing
        #[arg(long, default_value = "releases")]
        key_prefix: String,

        /// Attach a public-read ACL to the published object
        #[arg(long)]
        public: bool,

        /// Bundle the full extracted editor tree instead of just the
        /// code-server binary
        #[arg(long)]
        full_tree: bool,

        /// Branding directory (branding.json + icons/); requires
        /// --full-tree
        #[arg(long)]
        branding: Option<String>,

        /// Extra local file or directory included as-is at the archive
        /// root (repeatable)
        #[arg(long)]
        include: Vec<String>,
    },

    /// Parse and validate a manifest without fetching anything
    Validate {
        /// Path to the JSON manifest
        manifest: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bundle {
            manifest,
            release,
            arch,
            destination,
            bucket,
            key_prefix,
            public,
            full_tree,
            branding,
            include,
        } => commands::bundle::run(&BundleParams {
            manifest_path: &manifest,
            release: &release,
            architecture: arch.token(),
            destination: destination.as_deref(),
            bucket: bucket.as_deref(),
            key_prefix: &key_prefix,
            public,
            full_tree,
            branding: branding.as_deref(),
            include: &include,
        }),
        Commands::Validate { manifest } => commands::validate::run(&manifest),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_bundle_defaults() {
        let cli = Cli::try_parse_from(["csbundle", "bundle", "extensions.json"]).unwrap();
        match cli.command {
            Commands::Bundle {
                manifest,
                release,
                arch,
                destination,
                bucket,
                key_prefix,
                public,
                full_tree,
                branding,
                include,
            } => {
                assert_eq!(manifest, "extensions.json");
                assert_eq!(release, "latest");
                assert_eq!(arch, Arch::LinuxAmd64);
                assert!(destination.is_none());
                assert!(bucket.is_none());
                assert_eq!(key_prefix, "releases");
                assert!(!public);
                assert!(!full_tree);
                assert!(branding.is_none());
                assert!(include.is_empty());
            }
            _ => panic!("expected bundle command"),
        }
    }

    #[test]
    fn test_cli_parses_bundle_full() {
        let cli = Cli::try_parse_from([
            "csbundle",
            "bundle",
            "extensions.json",
            "--release",
            "v3.0.0",
            "--arch",
            "linux-arm64",
            "--destination",
            "out",
            "--bucket",
            "my-releases",
            "--key-prefix",
            "nightly",
            "--public",
            "--full-tree",
            "--branding",
            "branding",
            "--include",
            "settings.json",
            "--include",
            "services",
        ])
        .unwrap();
        match cli.command {
            Commands::Bundle {
                release,
                arch,
                destination,
                bucket,
                key_prefix,
                public,
                full_tree,
                branding,
                include,
                ..
            } => {
                assert_eq!(release, "v3.0.0");
                assert_eq!(arch, Arch::LinuxArm64);
                assert_eq!(destination.as_deref(), Some("out"));
                assert_eq!(bucket.as_deref(), Some("my-releases"));
                assert_eq!(key_prefix, "nightly");
                assert!(public);
                assert!(full_tree);
                assert_eq!(branding.as_deref(), Some("branding"));
                assert_eq!(include, vec!["settings.json", "services"]);
            }
            _ => panic!("expected bundle command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_arch() {
        assert!(Cli::try_parse_from([
            "csbundle",
            "bundle",
            "extensions.json",
            "--arch",
            "windows-amd64"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["csbundle", "validate", "extensions.json"]).unwrap();
        match cli.command {
            Commands::Validate { manifest } => assert_eq!(manifest, "extensions.json"),
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_arch_tokens() {
        assert_eq!(Arch::LinuxAmd64.token(), "linux-amd64");
        assert_eq!(Arch::AlpineAmd64.token(), "alpine-amd64");
    }
}
