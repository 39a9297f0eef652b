//! The version-keyed package repository.
//!
//! ```text
//! <root>/<name>/common-props.toml         provenance, per package
//! <root>/<name>/<versionCode>/props.toml  channel, per version
//! <root>/<name>/<versionCode>/base.apk    or the split's own file name
//! ```
//!
//! Records are whole-file overwrites. Nothing is locked, so concurrent
//! imports of one package race on `common-props.toml` and the last writer
//! wins.

pub mod fs;
pub mod memory;

use std::path::PathBuf;

use crate::error::Result;
use crate::model::{Artifact, ChannelRecord, PackageIdentity, ProvenanceRecord};

pub use fs::FsRepository;
pub use memory::MemoryRepository;

pub const CHANNEL_RECORD_FILE: &str = "props.toml";
pub const PROVENANCE_RECORD_FILE: &str = "common-props.toml";
pub const BASE_ARTIFACT_FILE: &str = "base.apk";

/// Path arithmetic for the repository tree. Touches nothing on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    root: PathBuf,
}

impl RepositoryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn base_dir(&self, id: &PackageIdentity) -> PathBuf {
        self.root.join(&id.name)
    }

    pub fn version_dir(&self, id: &PackageIdentity) -> PathBuf {
        self.base_dir(id).join(&id.version_code)
    }

    pub fn channel_record_path(&self, id: &PackageIdentity) -> PathBuf {
        self.version_dir(id).join(CHANNEL_RECORD_FILE)
    }

    pub fn provenance_record_path(&self, id: &PackageIdentity) -> PathBuf {
        self.base_dir(id).join(PROVENANCE_RECORD_FILE)
    }

    pub fn base_artifact_path(&self, id: &PackageIdentity) -> PathBuf {
        self.version_dir(id).join(BASE_ARTIFACT_FILE)
    }

    /// Split artifacts keep their file name; a sole artifact becomes `base.apk`.
    pub fn artifact_destination(&self, id: &PackageIdentity, artifact: &Artifact) -> Result<PathBuf> {
        if artifact.is_split {
            Ok(self.version_dir(id).join(artifact.file_name()?))
        } else {
            Ok(self.base_artifact_path(id))
        }
    }
}

/// Storage operations the importer needs.
///
/// Implementations own the tree exclusively; nothing else reads or writes it.
pub trait Repository {
    fn layout(&self) -> &RepositoryLayout;

    /// Create the version directory and any missing ancestors. Idempotent.
    fn ensure_version_dir(&mut self, id: &PackageIdentity) -> Result<()>;

    /// Overwrite the version's `props.toml`.
    fn write_channel_record(&mut self, id: &PackageIdentity, record: &ChannelRecord) -> Result<()>;

    /// Copy the artifact into the version directory, overwriting. Returns
    /// where it landed.
    fn store_artifact(&mut self, id: &PackageIdentity, artifact: &Artifact) -> Result<PathBuf>;

    /// Overwrite the package's `common-props.toml`.
    fn write_provenance_record(
        &mut self,
        id: &PackageIdentity,
        record: &ProvenanceRecord,
    ) -> Result<()>;

    /// Current provenance record of the package, if any.
    fn read_provenance_record(&self, id: &PackageIdentity) -> Result<Option<ProvenanceRecord>>;
}
