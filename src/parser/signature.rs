//! Signer extraction from `apksigner verify --print-certs --verbose` output.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ImportError, Result};
use crate::model::SigningFingerprint;

static SIGNER_DIGEST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Signer #[0-9]+ certificate SHA-256 digest: (.*)$").unwrap()
});

/// Extract the single signer's certificate digest for `artifact`.
///
/// Artifacts signed by more than one signer are rejected.
pub fn extract_signature(artifact: &Path, output: &str) -> Result<SigningFingerprint> {
    let mut digest: Option<&str> = None;

    for line in output.lines() {
        let Some(cap) = SIGNER_DIGEST_RE.captures(line) else {
            continue;
        };
        if digest.is_some() {
            return Err(ImportError::MultiSigner {
                artifact: artifact.display().to_string(),
            });
        }
        digest = cap.get(1).map(|m| m.as_str());
    }

    let digest = digest.ok_or_else(|| ImportError::SignatureNotFound {
        artifact: artifact.display().to_string(),
    })?;

    SigningFingerprint::parse(digest).ok_or_else(|| ImportError::InvalidDigest {
        artifact: artifact.display().to_string(),
        digest: digest.trim().to_string(),
    })
}
