use crate::constants::{NOTES_FILE, STYLE_FILE};
use log::{debug, warn};
use std::{fs, path::Path};

/// Free-form notes kept in `promptHelper/notes.md`
pub fn read_notes(root: &Path) -> Option<String> {
    read_optional(&root.join(NOTES_FILE))
}

/// Style guide text from `--style`, falling back to `promptHelper/style.md`.
/// A relative `--style` path is taken from the project root.
pub fn read_style(root: &Path, style: Option<&Path>) -> Option<String> {
    let path = match style {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => root.join(p),
        None => root.join(STYLE_FILE),
    };
    if style.is_some() && !path.is_file() {
        warn!("Style file not found: {}", path.display());
    }
    read_optional(&path)
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        debug!("Skipping missing {}", path.display());
        return None;
    }
    match fs::read_to_string(path) {
        Ok(text) => Some(text.trim().to_string()),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}
