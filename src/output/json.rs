use crate::error::Result;
use crate::importer::ImportReport;

/// Render an import report as JSON.
pub fn render(report: &ImportReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
