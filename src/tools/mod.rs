pub mod sdk;

#[cfg(test)]
pub(crate) mod canned;

use std::path::Path;

use crate::error::Result;

pub use sdk::SdkTools;

/// The two Android build tools the importer consumes text from.
///
/// Implementations only capture output; interpreting it is the job of
/// [`crate::parser`].
pub trait PackageTools {
    /// Output of `aapt2 dump badging <apk>`.
    fn dump_badging(&self, apk: &Path) -> Result<String>;

    /// Output of `apksigner verify --print-certs --verbose <apk>`.
    fn verify_certificates(&self, apk: &Path) -> Result<String>;
}
