//! apk-import: import signed Android packages into a version-keyed repository.
//!
//! Each import reads the package identity from `aapt2` badging output, copies
//! the artifact under `<root>/<name>/<versionCode>/`, checks with `apksigner`
//! that exactly one certificate signs it, and records the channel and the
//! signer fingerprint next to it.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use apkimport::{import_apk, ImportOptions};
//!
//! let options = ImportOptions::default();
//! let report = import_apk(Path::new("app-release.apk"), "store", "stable", &options).unwrap();
//! println!("{} signed by {}", report.metadata.identity, report.fingerprint);
//! ```

pub mod config;
pub mod error;
pub mod importer;
pub mod model;
pub mod output;
pub mod parser;
pub mod repository;
pub mod tools;

use std::path::{Path, PathBuf};

use config::Config;
use error::Result;
use output::OutputFormat;
use repository::FsRepository;
use tools::SdkTools;

pub use importer::{ImportReport, ImportRequest, Importer};

/// Options for an import invocation.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Path to config file (defaults to `.apkimport.toml` in the working directory).
    pub config_path: Option<PathBuf>,
    /// CLI override for the repository root.
    pub repo_root: Option<PathBuf>,
    /// CLI override for the `aapt2` executable.
    pub aapt2: Option<PathBuf>,
    /// CLI override for the `apksigner` executable.
    pub apksigner: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            repo_root: None,
            aapt2: None,
            apksigner: None,
            format: OutputFormat::Console,
        }
    }
}

/// Import one artifact using the real SDK tools and the on-disk repository.
pub fn import_apk(
    artifact: &Path,
    source: &str,
    channel: &str,
    options: &ImportOptions,
) -> Result<ImportReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(".apkimport.toml"));
    let mut config = Config::load(&config_path)?;

    // Apply CLI overrides
    if let Some(root) = &options.repo_root {
        config.repository.root = root.clone();
    }
    if let Some(aapt2) = &options.aapt2 {
        config.tools.aapt2 = aapt2.clone();
    }
    if let Some(apksigner) = &options.apksigner {
        config.tools.apksigner = apksigner.clone();
    }

    let mut importer = Importer::new(
        SdkTools::from_config(&config.tools),
        FsRepository::new(config.repository.root),
    );

    importer.import(&ImportRequest {
        artifact_path: artifact.to_path_buf(),
        source: source.to_string(),
        channel: channel.to_string(),
    })
}

/// Render an import report in the specified format.
pub fn render_report(report: &ImportReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
