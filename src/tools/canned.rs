use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};

/// Test double returning fixed tool output and recording what was inspected.
#[derive(Debug, Default)]
pub(crate) struct CannedTools {
    pub badging: String,
    pub certificates: Option<String>,
    pub badging_calls: RefCell<Vec<PathBuf>>,
    pub verify_calls: RefCell<Vec<PathBuf>>,
}

impl CannedTools {
    pub fn new(badging: impl Into<String>, certificates: impl Into<String>) -> Self {
        Self {
            badging: badging.into(),
            certificates: Some(certificates.into()),
            ..Default::default()
        }
    }
}

impl super::PackageTools for CannedTools {
    fn dump_badging(&self, apk: &Path) -> Result<String> {
        self.badging_calls.borrow_mut().push(apk.to_path_buf());
        Ok(self.badging.clone())
    }

    fn verify_certificates(&self, apk: &Path) -> Result<String> {
        self.verify_calls.borrow_mut().push(apk.to_path_buf());
        self.certificates.clone().ok_or_else(|| ImportError::Tool {
            tool: "apksigner".into(),
            message: "exited with exit status: 1: DOES NOT VERIFY".into(),
        })
    }
}
