use crate::types::ProjectReport;
use anyhow::{Context, Result};
use log::info;
use std::{fs, path::Path};

/// Write the full report as pretty-printed JSON
pub fn write_json_manifest(path: &Path, report: &ProjectReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize project report")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("JSON manifest written to {}", path.display());
    Ok(())
}
