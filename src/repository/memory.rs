use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::{Repository, RepositoryLayout};
use crate::error::{ImportError, Result};
use crate::model::{Artifact, ChannelRecord, PackageIdentity, ProvenanceRecord};

/// A file held by [`MemoryRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryFile {
    /// A record written as text.
    Text(String),
    /// An artifact copy, remembered by where it was copied from.
    CopyOf(PathBuf),
}

/// In-memory repository for exercising the importer without a disk.
///
/// Mirrors [`super::FsRepository`]: writing into a directory that was never
/// created fails like the filesystem would.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    layout: RepositoryLayout,
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, MemoryFile>,
}

impl MemoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: RepositoryLayout::new(root),
            dirs: BTreeSet::new(),
            files: BTreeMap::new(),
        }
    }

    pub fn dirs(&self) -> &BTreeSet<PathBuf> {
        &self.dirs
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, MemoryFile> {
        &self.files
    }

    pub fn file(&self, path: &Path) -> Option<&MemoryFile> {
        self.files.get(path)
    }

    /// Text content of a record file.
    pub fn text(&self, path: &Path) -> Option<&str> {
        match self.files.get(path) {
            Some(MemoryFile::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn put(&mut self, path: PathBuf, file: MemoryFile) -> Result<()> {
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        if !self.dirs.contains(&parent) {
            return Err(ImportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory does not exist: {}", parent.display()),
            )));
        }
        self.files.insert(path, file);
        Ok(())
    }
}

impl Repository for MemoryRepository {
    fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    fn ensure_version_dir(&mut self, id: &PackageIdentity) -> Result<()> {
        let version_dir = self.layout.version_dir(id);
        let ancestors: Vec<PathBuf> = version_dir
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();
        self.dirs.extend(ancestors);
        Ok(())
    }

    fn write_channel_record(&mut self, id: &PackageIdentity, record: &ChannelRecord) -> Result<()> {
        let path = self.layout.channel_record_path(id);
        self.put(path, MemoryFile::Text(record.to_toml()?))
    }

    fn store_artifact(&mut self, id: &PackageIdentity, artifact: &Artifact) -> Result<PathBuf> {
        let dest = self.layout.artifact_destination(id, artifact)?;
        self.put(dest.clone(), MemoryFile::CopyOf(artifact.source_path.clone()))?;
        Ok(dest)
    }

    fn write_provenance_record(
        &mut self,
        id: &PackageIdentity,
        record: &ProvenanceRecord,
    ) -> Result<()> {
        let path = self.layout.provenance_record_path(id);
        self.put(path, MemoryFile::Text(record.to_toml()?))
    }

    fn read_provenance_record(&self, id: &PackageIdentity) -> Result<Option<ProvenanceRecord>> {
        match self.text(&self.layout.provenance_record_path(id)) {
            Some(text) => Ok(Some(ProvenanceRecord::from_toml(text)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> PackageIdentity {
        PackageIdentity::new("com.example.app", "7").unwrap()
    }

    #[test]
    fn ensure_version_dir_creates_ancestors() {
        let mut repo = MemoryRepository::new("apps/packages");
        repo.ensure_version_dir(&id()).unwrap();
        assert!(repo.dirs().contains(Path::new("apps")));
        assert!(repo.dirs().contains(Path::new("apps/packages/com.example.app")));
        assert!(repo.dirs().contains(Path::new("apps/packages/com.example.app/7")));
    }

    #[test]
    fn writes_require_version_dir() {
        let mut repo = MemoryRepository::new("apps/packages");
        let err = repo
            .write_channel_record(&id(), &ChannelRecord::new("stable"))
            .unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
        assert!(repo.files().is_empty());
    }

    #[test]
    fn store_artifact_records_source() {
        let mut repo = MemoryRepository::new("apps/packages");
        repo.ensure_version_dir(&id()).unwrap();
        let dest = repo
            .store_artifact(&id(), &Artifact::new("/dl/app.apk", false))
            .unwrap();
        assert_eq!(
            repo.file(&dest),
            Some(&MemoryFile::CopyOf(PathBuf::from("/dl/app.apk")))
        );
    }
}
