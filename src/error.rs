use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

/// Badging fields the import cannot proceed without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Name,
    VersionCode,
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "package name"),
            Self::VersionCode => write!(f, "version code"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Badging output is missing the {0}")]
    MissingMetadata(MetadataField),

    #[error("Invalid {field} in badging output: {value:?}")]
    InvalidMetadata { field: MetadataField, value: String },

    #[error("Malformed badging output: {0}")]
    MalformedBadging(String),

    #[error("{artifact} has more than one signer")]
    MultiSigner { artifact: String },

    #[error("Didn't find signature of {artifact}")]
    SignatureNotFound { artifact: String },

    #[error("Invalid SHA-256 certificate digest for {artifact}: {digest:?}")]
    InvalidDigest { artifact: String, digest: String },

    #[error("Invalid {field} label {value:?}: control characters are not allowed")]
    InvalidLabel { field: &'static str, value: String },

    #[error("Invalid artifact path: {0}")]
    InvalidArtifact(String),

    #[error("Tool error ({tool}): {message}")]
    Tool { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl ImportError {
    /// Every failure aborts the import; callers only see success or not.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
