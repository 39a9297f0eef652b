//! Data model shared by the extractors, the repository and the importer.
//!
//! Everything here is derived fresh on each import. The repository on disk
//! is the only persistent state.

pub mod fingerprint;
pub mod records;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, MetadataField, Result};

pub use fingerprint::SigningFingerprint;
pub use records::{validate_label, ChannelRecord, ProvenanceRecord};

/// Package identity as reported by the badging dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    /// Application id, e.g. `com.example.app`.
    pub name: String,
    /// Integer version code, kept as the string the tool printed.
    pub version_code: String,
}

impl PackageIdentity {
    /// Build an identity, rejecting values that cannot serve as a single
    /// directory name inside the repository.
    pub fn new(name: impl Into<String>, version_code: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let version_code = version_code.into();

        if !is_path_component(&name) {
            return Err(ImportError::InvalidMetadata {
                field: MetadataField::Name,
                value: name,
            });
        }
        if !version_code.chars().all(|c| c.is_ascii_digit()) || version_code.is_empty() {
            return Err(ImportError::InvalidMetadata {
                field: MetadataField::VersionCode,
                value: version_code,
            });
        }

        Ok(Self { name, version_code })
    }
}

impl std::fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.version_code)
    }
}

fn is_path_component(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(&['/', '\\', '\0'][..])
}

/// Everything the badging dump tells us about an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub identity: PackageIdentity,
    /// One of several partial packages for the same version.
    pub is_split: bool,
    /// Human-readable version, informational only.
    pub version_name: Option<String>,
    /// Value of the `split` token, e.g. `config.arm64_v8a`.
    pub split_name: Option<String>,
}

/// The package file being imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub source_path: PathBuf,
    pub is_split: bool,
}

impl Artifact {
    pub fn new(source_path: impl Into<PathBuf>, is_split: bool) -> Self {
        Self {
            source_path: source_path.into(),
            is_split,
        }
    }

    /// Original file name, kept for split artifacts.
    pub fn file_name(&self) -> Result<&Path> {
        self.source_path
            .file_name()
            .map(Path::new)
            .ok_or_else(|| ImportError::InvalidArtifact(self.source_path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_accepts_regular_values() {
        let id = PackageIdentity::new("com.example.app", "12").unwrap();
        assert_eq!(id.name, "com.example.app");
        assert_eq!(id.version_code, "12");
        assert_eq!(id.to_string(), "com.example.app (12)");
    }

    #[test]
    fn identity_rejects_path_traversal() {
        for name in ["..", ".", "com/example", "a\\b", ""] {
            let err = PackageIdentity::new(name, "1").unwrap_err();
            assert!(matches!(
                err,
                ImportError::InvalidMetadata {
                    field: MetadataField::Name,
                    ..
                }
            ));
        }
    }

    #[test]
    fn identity_rejects_non_numeric_version() {
        for version in ["1.0", "../1", "", "12a"] {
            let err = PackageIdentity::new("com.example.app", version).unwrap_err();
            assert!(matches!(
                err,
                ImportError::InvalidMetadata {
                    field: MetadataField::VersionCode,
                    ..
                }
            ));
        }
    }

    #[test]
    fn artifact_file_name() {
        let artifact = Artifact::new("/tmp/in/split_config.en.apk", true);
        assert_eq!(
            artifact.file_name().unwrap(),
            Path::new("split_config.en.apk")
        );
        assert!(Artifact::new("/", false).file_name().is_err());
    }
}
