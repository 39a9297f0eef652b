//! The import pipeline: badging → layout → copy → verify → provenance.
//!
//! There is no rollback. A signature failure leaves the copied artifact and
//! the channel record behind, and the previous provenance record untouched.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    validate_label, Artifact, ChannelRecord, PackageMetadata, ProvenanceRecord,
    SigningFingerprint,
};
use crate::parser::{extract_metadata, extract_signature};
use crate::repository::Repository;
use crate::tools::PackageTools;

/// One artifact to import.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub artifact_path: PathBuf,
    /// Free-form provenance label, e.g. `play-store`.
    pub source: String,
    /// Free-form distribution track, e.g. `stable`.
    pub channel: String,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub metadata: PackageMetadata,
    pub artifact: Artifact,
    pub stored_path: PathBuf,
    pub source: String,
    pub channel: String,
    pub fingerprint: SigningFingerprint,
    /// Signatures listed in the provenance record before this import.
    pub previous_signatures: Vec<SigningFingerprint>,
    /// The package was previously recorded with a different signing key.
    pub signer_changed: bool,
    pub imported_at: DateTime<Utc>,
}

/// Runs imports against a set of tools and a repository.
pub struct Importer<T, R> {
    tools: T,
    repository: R,
}

impl<T: PackageTools, R: Repository> Importer<T, R> {
    pub fn new(tools: T, repository: R) -> Self {
        Self { tools, repository }
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_parts(self) -> (T, R) {
        (self.tools, self.repository)
    }

    pub fn import(&mut self, request: &ImportRequest) -> Result<ImportReport> {
        tracing::info!(
            artifact = %request.artifact_path.display(),
            source = %request.source,
            channel = %request.channel,
            "importing"
        );

        validate_label("source", &request.source)?;
        validate_label("channel", &request.channel)?;

        let badging = self.tools.dump_badging(&request.artifact_path)?;
        let metadata = extract_metadata(&badging)?;
        let id = &metadata.identity;
        let artifact = Artifact::new(&request.artifact_path, metadata.is_split);

        self.repository.ensure_version_dir(id)?;
        self.repository
            .write_channel_record(id, &ChannelRecord::new(&request.channel))?;

        let stored_path = self.repository.store_artifact(id, &artifact)?;
        tracing::info!(path = %stored_path.display(), "copied");

        // Splits are not verified on their own; the version's base artifact is.
        let base_path = self.repository.layout().base_artifact_path(id);
        let certificates = self.tools.verify_certificates(&base_path)?;
        let fingerprint = extract_signature(&base_path, &certificates)?;

        let previous_signatures = self.previous_signatures(&metadata);
        let signer_changed =
            !previous_signatures.is_empty() && !previous_signatures.contains(&fingerprint);
        if signer_changed {
            let previous: Vec<&str> = previous_signatures
                .iter()
                .map(SigningFingerprint::as_str)
                .collect();
            tracing::warn!(
                package = %id.name,
                ?previous,
                current = %fingerprint,
                "signing certificate changed"
            );
        }

        self.repository.write_provenance_record(
            id,
            &ProvenanceRecord::new(&request.source, vec![fingerprint.clone()]),
        )?;

        Ok(ImportReport {
            metadata,
            artifact,
            stored_path,
            source: request.source.clone(),
            channel: request.channel.clone(),
            fingerprint,
            previous_signatures,
            signer_changed,
            imported_at: Utc::now(),
        })
    }

    /// Signatures of the record about to be overwritten. A record that cannot
    /// be read is treated as absent.
    fn previous_signatures(&self, metadata: &PackageMetadata) -> Vec<SigningFingerprint> {
        match self.repository.read_provenance_record(&metadata.identity) {
            Ok(Some(record)) => record.signatures,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    package = %metadata.identity.name,
                    error = %e,
                    "unreadable provenance record, overwriting"
                );
                Vec::new()
            }
        }
    }
}
