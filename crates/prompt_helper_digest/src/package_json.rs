use crate::types::PackageJson;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::{fs, path::Path};

/// Read `package.json` from the project root. A missing file is `None`;
/// unreadable or malformed JSON is logged and treated the same way.
pub fn read_package_json(root: &Path) -> Option<PackageJson> {
    let path = root.join("package.json");
    if !path.is_file() {
        debug!("No package.json at {}", path.display());
        return None;
    }
    match parse_package_json(&path) {
        Ok(pkg) => Some(pkg),
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    }
}

fn parse_package_json(path: &Path) -> Result<PackageJson> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
