//! Path header stamps.
//!
//! Every tracked file is expected to start with a comment naming its
//! project-relative path, e.g. `// src/index.ts` or `/* public/site.css */`.
//! A leading shebang line is allowed before the stamp.

use anyhow::{Context, Result};
use log::{debug, error};
use std::{fs, path::Path};

const HASH: (&str, &str) = ("# ", "");
const SLASH: (&str, &str) = ("// ", "");
const BLOCK: (&str, &str) = ("/* ", " */");
const MARKUP: (&str, &str) = ("<!-- ", " -->");

/// Special file names that have no extension but take `#` comments
const HASH_FILE_NAMES: &[&str] = &["Dockerfile", "Makefile", "CMakeLists.txt"];

/// Comment delimiters for an extension (lower case, without the dot)
fn comment_style(ext: &str) -> Option<(&'static str, &'static str)> {
    let style = match ext {
        "ts" | "tsx" | "js" | "jsx" | "mjs" => SLASH,
        "go" | "java" | "cs" | "cpp" | "cc" | "cxx" | "c" => SLASH,
        "jsonc" => SLASH,
        "sh" | "bash" | "zsh" | "py" | "rb" | "pl" | "tcl" | "ps1" => HASH,
        "bat" | "cmd" => ("REM ", ""),
        "css" | "scss" | "sass" | "less" => BLOCK,
        "html" | "htm" | "xml" | "md" => MARKUP,
        "yaml" | "yml" | "toml" => HASH,
        "ini" => ("; ", ""),
        _ => return None,
    };
    Some(style)
}

/// The header line expected at the top of `rel_path`, or `None` when the file
/// type has no comment syntax we know of.
pub fn expected_header(rel_path: &str) -> Option<String> {
    let path = Path::new(rel_path);
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

    if HASH_FILE_NAMES.contains(&file_name) {
        return Some(format!("{}{}", HASH.0, rel_path));
    }

    let ext = path.extension().and_then(|e| e.to_str())?.to_lowercase();
    let (prefix, suffix) = comment_style(&ext)?;
    Some(format!("{}{}{}", prefix, rel_path, suffix))
}

/// Whether `contents` already carries `header` in the stamp position.
fn header_matches(contents: &str, header: &str) -> bool {
    let mut lines = contents.split('\n');
    let first = lines.next().unwrap_or_default().trim();
    if first.starts_with("#!") {
        return lines.next().unwrap_or_default().trim() == header;
    }
    first == header
}

pub fn has_correct_header(file: &Path, rel_path: &str) -> bool {
    let Some(header) = expected_header(rel_path) else {
        return true;
    };

    match fs::read_to_string(file) {
        Ok(contents) => header_matches(&contents, &header),
        Err(e) => {
            error!("Error reading file to check header: {}: {}", file.display(), e);
            false
        }
    }
}

/// Rewrites `contents` so it starts with `header` (after a shebang, if any),
/// dropping any other copies of the header line.
pub fn stamp_header(contents: &str, header: &str) -> String {
    let mut lines: Vec<&str> = contents.split('\n').filter(|line| line.trim() != header).collect();

    let insert_at =
        if lines.first().is_some_and(|first| first.trim().starts_with("#!")) { 1 } else { 0 };
    lines.insert(insert_at, header);
    lines.join("\n")
}

/// Writes the expected header into `file` in place. Does nothing for file
/// types without a known comment style.
pub fn add_header(file: &Path, rel_path: &str) -> Result<()> {
    let Some(header) = expected_header(rel_path) else {
        return Ok(());
    };

    let contents =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    fs::write(file, stamp_header(&contents, &header))
        .with_context(|| format!("Failed to write header into {}", file.display()))?;
    debug!("Stamped header '{}' into {}", header, file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expected_header_by_extension() {
        assert_eq!(expected_header("src/a.ts").as_deref(), Some("// src/a.ts"));
        assert_eq!(expected_header("public/site.css").as_deref(), Some("/* public/site.css */"));
        assert_eq!(expected_header("docs/README.MD").as_deref(), Some("<!-- docs/README.MD -->"));
        assert_eq!(expected_header("scripts/run.bat").as_deref(), Some("REM scripts/run.bat"));
        assert_eq!(expected_header("setup.ini").as_deref(), Some("; setup.ini"));
    }

    #[test]
    fn test_expected_header_special_names() {
        assert_eq!(expected_header("Dockerfile").as_deref(), Some("# Dockerfile"));
        assert_eq!(expected_header("native/CMakeLists.txt").as_deref(), Some("# native/CMakeLists.txt"));
    }

    #[test]
    fn test_expected_header_unmapped() {
        assert_eq!(expected_header("image.png"), None);
        assert_eq!(expected_header("LICENSE"), None);
    }

    #[test]
    fn test_header_matches_with_shebang() {
        assert!(header_matches("#!/usr/bin/env node\n// bin/cli.js\nmain();", "// bin/cli.js"));
        assert!(!header_matches("// bin/cli.js\n#!/usr/bin/env node", "// src/other.js"));
        assert!(header_matches("  // src/a.ts  \nconst a = 1;", "// src/a.ts"));
    }

    #[test]
    fn test_stamp_header_inserts_at_top() {
        let out = stamp_header("const a = 1;\n", "// src/a.ts");
        assert_eq!(out, "// src/a.ts\nconst a = 1;\n");
    }

    #[test]
    fn test_stamp_header_after_shebang_and_dedupes() {
        let out = stamp_header("#!/usr/bin/env node\nrun();\n// bin/cli.js\n", "// bin/cli.js");
        assert_eq!(out, "#!/usr/bin/env node\n// bin/cli.js\nrun();\n");
    }

    #[test]
    fn test_add_header_round_trip_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.ts");
        fs::write(&file, "export const a = 1;").unwrap();

        assert!(!has_correct_header(&file, "src/a.ts"));
        add_header(&file, "src/a.ts").unwrap();
        assert!(has_correct_header(&file, "src/a.ts"));
        assert_eq!(fs::read_to_string(&file).unwrap(), "// src/a.ts\nexport const a = 1;");
    }

    #[test]
    fn test_unreadable_file_has_no_correct_header() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!has_correct_header(&temp_dir.path().join("missing.ts"), "missing.ts"));
        assert!(has_correct_header(&temp_dir.path().join("missing.png"), "missing.png"));
    }
}
