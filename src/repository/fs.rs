use std::path::{Path, PathBuf};

use super::{Repository, RepositoryLayout};
use crate::error::Result;
use crate::model::{Artifact, ChannelRecord, PackageIdentity, ProvenanceRecord};

/// Repository backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsRepository {
    layout: RepositoryLayout,
}

impl FsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: RepositoryLayout::new(root),
        }
    }
}

impl Repository for FsRepository {
    fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    fn ensure_version_dir(&mut self, id: &PackageIdentity) -> Result<()> {
        std::fs::create_dir_all(self.layout.version_dir(id))?;
        Ok(())
    }

    fn write_channel_record(&mut self, id: &PackageIdentity, record: &ChannelRecord) -> Result<()> {
        std::fs::write(self.layout.channel_record_path(id), record.to_toml()?)?;
        Ok(())
    }

    fn store_artifact(&mut self, id: &PackageIdentity, artifact: &Artifact) -> Result<PathBuf> {
        let dest = self.layout.artifact_destination(id, artifact)?;

        if is_same_file(&artifact.source_path, &dest)? {
            tracing::debug!(path = %dest.display(), "artifact already in place");
        } else {
            std::fs::copy(&artifact.source_path, &dest)?;
        }

        Ok(dest)
    }

    fn write_provenance_record(
        &mut self,
        id: &PackageIdentity,
        record: &ProvenanceRecord,
    ) -> Result<()> {
        std::fs::write(self.layout.provenance_record_path(id), record.to_toml()?)?;
        Ok(())
    }

    fn read_provenance_record(&self, id: &PackageIdentity) -> Result<Option<ProvenanceRecord>> {
        let path = self.layout.provenance_record_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(ProvenanceRecord::from_toml(&content)?))
    }
}

/// Copying a file onto itself would truncate it.
fn is_same_file(source: &Path, dest: &Path) -> Result<bool> {
    if !dest.exists() {
        return Ok(false);
    }
    Ok(std::fs::canonicalize(source)? == std::fs::canonicalize(dest)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SigningFingerprint;
    use pretty_assertions::assert_eq;

    const DIGEST: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456123";

    fn id() -> PackageIdentity {
        PackageIdentity::new("com.example.app", "12").unwrap()
    }

    #[test]
    fn ensure_version_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FsRepository::new(dir.path().join("apps/packages"));
        repo.ensure_version_dir(&id()).unwrap();
        repo.ensure_version_dir(&id()).unwrap();
        assert!(dir.path().join("apps/packages/com.example.app/12").is_dir());
    }

    #[test]
    fn channel_record_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FsRepository::new(dir.path());
        repo.ensure_version_dir(&id()).unwrap();
        repo.write_channel_record(&id(), &ChannelRecord::new("beta"))
            .unwrap();
        repo.write_channel_record(&id(), &ChannelRecord::new("stable"))
            .unwrap();
        let content =
            std::fs::read_to_string(dir.path().join("com.example.app/12/props.toml")).unwrap();
        assert_eq!(content, "channel = \"stable\"\n");
    }

    #[test]
    fn stores_base_and_split_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("app-release.apk"), b"base").unwrap();
        std::fs::write(src.join("split_config.en.apk"), b"split").unwrap();

        let mut repo = FsRepository::new(dir.path().join("repo"));
        repo.ensure_version_dir(&id()).unwrap();

        let base = repo
            .store_artifact(&id(), &Artifact::new(src.join("app-release.apk"), false))
            .unwrap();
        assert_eq!(base, dir.path().join("repo/com.example.app/12/base.apk"));
        assert_eq!(std::fs::read(&base).unwrap(), b"base");

        let split = repo
            .store_artifact(&id(), &Artifact::new(src.join("split_config.en.apk"), true))
            .unwrap();
        assert_eq!(
            split,
            dir.path().join("repo/com.example.app/12/split_config.en.apk")
        );
        assert_eq!(std::fs::read(&split).unwrap(), b"split");
    }

    #[test]
    fn storing_artifact_onto_itself_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FsRepository::new(dir.path());
        repo.ensure_version_dir(&id()).unwrap();
        let in_place = dir.path().join("com.example.app/12/base.apk");
        std::fs::write(&in_place, b"apk bytes").unwrap();

        repo.store_artifact(&id(), &Artifact::new(&in_place, false))
            .unwrap();
        assert_eq!(std::fs::read(&in_place).unwrap(), b"apk bytes");
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FsRepository::new(dir.path());
        repo.ensure_version_dir(&id()).unwrap();
        let err = repo
            .store_artifact(&id(), &Artifact::new(dir.path().join("nope.apk"), false))
            .unwrap_err();
        assert!(matches!(err, crate::error::ImportError::Io(_)));
    }

    #[test]
    fn provenance_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = FsRepository::new(dir.path());
        assert_eq!(repo.read_provenance_record(&id()).unwrap(), None);

        repo.ensure_version_dir(&id()).unwrap();
        let record =
            ProvenanceRecord::new("store", vec![SigningFingerprint::parse(DIGEST).unwrap()]);
        repo.write_provenance_record(&id(), &record).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("com.example.app/common-props.toml")).unwrap();
        assert_eq!(
            content,
            format!("signatures = [\"{DIGEST}\"]\nsource = \"store\"\n")
        );
        assert_eq!(repo.read_provenance_record(&id()).unwrap(), Some(record));
    }
}
