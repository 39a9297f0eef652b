use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

/// Top-level configuration from `.apkimport.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Where the package tree lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Directory holding one subdirectory per package.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("apps/packages")
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

/// Executables used to inspect artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_aapt2")]
    pub aapt2: PathBuf,
    #[serde(default = "default_apksigner")]
    pub apksigner: PathBuf,
}

fn default_aapt2() -> PathBuf {
    PathBuf::from("aapt2")
}

fn default_apksigner() -> PathBuf {
    PathBuf::from("apksigner")
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            aapt2: default_aapt2(),
            apksigner: default_apksigner(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.repository.root.as_os_str().is_empty() {
            return Err(ImportError::Config("repository.root must not be empty".into()));
        }
        for (name, path) in [("aapt2", &self.tools.aapt2), ("apksigner", &self.tools.apksigner)] {
            if path.as_os_str().is_empty() {
                return Err(ImportError::Config(format!("tools.{name} must not be empty")));
            }
        }
        Ok(())
    }
}
