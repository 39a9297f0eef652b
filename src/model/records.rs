use serde::{Deserialize, Serialize};

use super::SigningFingerprint;
use crate::error::{ImportError, Result};

/// Reject labels that would not fit on one record line.
pub fn validate_label(field: &'static str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(ImportError::InvalidLabel {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Distribution channel of one package version, stored as `props.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub channel: String,
}

impl ChannelRecord {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

/// Package-level provenance, stored as `common-props.toml`.
///
/// Field order is the on-disk line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    pub signatures: Vec<SigningFingerprint>,
    pub source: String,
}

impl ProvenanceRecord {
    pub fn new(source: impl Into<String>, signatures: Vec<SigningFingerprint>) -> Self {
        Self {
            signatures,
            source: source.into(),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
