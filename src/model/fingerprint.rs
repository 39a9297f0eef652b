use serde::{Deserialize, Serialize};

/// SHA-256 digest of the sole signer's certificate, as 64 lowercase hex chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SigningFingerprint(String);

impl SigningFingerprint {
    /// Parse a digest, normalising to lowercase. Returns `None` unless the
    /// input decodes to exactly 32 bytes.
    pub fn parse(digest: &str) -> Option<Self> {
        let digest = digest.trim().to_ascii_lowercase();
        match hex::decode(&digest) {
            Ok(bytes) if bytes.len() == 32 => Some(Self(digest)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SigningFingerprint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not a SHA-256 hex digest: {value:?}"))
    }
}

impl From<SigningFingerprint> for String {
    fn from(value: SigningFingerprint) -> Self {
        value.0
    }
}

impl std::fmt::Display for SigningFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
