use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::ToolsConfig;
use crate::error::{ImportError, Result};

/// Runs the real `aapt2` and `apksigner` binaries.
///
/// Calls block until the tool exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct SdkTools {
    aapt2: PathBuf,
    apksigner: PathBuf,
}

impl SdkTools {
    pub fn new(aapt2: impl Into<PathBuf>, apksigner: impl Into<PathBuf>) -> Self {
        Self {
            aapt2: aapt2.into(),
            apksigner: apksigner.into(),
        }
    }

    pub fn from_config(config: &ToolsConfig) -> Self {
        Self::new(&config.aapt2, &config.apksigner)
    }
}

impl super::PackageTools for SdkTools {
    fn dump_badging(&self, apk: &Path) -> Result<String> {
        run(&self.aapt2, &[OsStr::new("dump"), OsStr::new("badging"), apk.as_os_str()])
    }

    fn verify_certificates(&self, apk: &Path) -> Result<String> {
        run(
            &self.apksigner,
            &[
                OsStr::new("verify"),
                OsStr::new("--print-certs"),
                OsStr::new("--verbose"),
                apk.as_os_str(),
            ],
        )
    }
}

fn run(program: &Path, args: &[&OsStr]) -> Result<String> {
    let tool = program.display().to_string();
    tracing::debug!(tool = %tool, ?args, "running tool");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ImportError::Tool {
            tool: tool.clone(),
            message: format!("failed to run: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ImportError::Tool {
            tool,
            message: format!("exited with {}: {}", output.status, stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::tools::PackageTools;

    #[test]
    fn passes_badging_arguments() {
        let tools = SdkTools::new("echo", "echo");
        let out = tools.dump_badging(Path::new("/tmp/in/app.apk")).unwrap();
        assert_eq!(out, "dump badging /tmp/in/app.apk\n");
    }

    #[test]
    fn passes_verify_arguments() {
        let tools = SdkTools::new("echo", "echo");
        let out = tools
            .verify_certificates(Path::new("apps/packages/x/1/base.apk"))
            .unwrap();
        assert_eq!(
            out,
            "verify --print-certs --verbose apps/packages/x/1/base.apk\n"
        );
    }

    #[test]
    fn non_zero_exit_is_a_tool_error() {
        let tools = SdkTools::new("false", "false");
        let err = tools.dump_badging(Path::new("app.apk")).unwrap_err();
        assert!(matches!(err, ImportError::Tool { ref tool, .. } if tool == "false"));
    }

    #[test]
    fn missing_binary_is_a_tool_error() {
        let tools = SdkTools::new("/nonexistent/aapt2", "/nonexistent/apksigner");
        let err = tools.verify_certificates(Path::new("app.apk")).unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }
}
