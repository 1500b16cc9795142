use std::path::Path;

use anyhow::{Context, Result};
use crate::report::result::ReportResult;

/// Render a merged report as pretty-printed JSON
pub fn render(report: &ReportResult) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}

/// Render a merged report as JSON into `path`
pub fn write(report: &ReportResult, path: &Path) -> Result<()> {
    let json = render(report)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
