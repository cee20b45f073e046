use crate::{
    collector::{collect_files, relative_display},
    types::TodoItem,
};
use anyhow::Result;
use log::{debug, warn};
use prompt_helper_core::SOURCE_EXTENSIONS;
use rayon::prelude::*;
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

static TODO_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*(TODO|FIXME)\s*[:-]?\s*(.*)$").expect("valid regex"));

/// Find `// TODO` and `// FIXME` comments in the project's script files
pub fn collect_todos(root: &Path) -> Result<Vec<TodoItem>> {
    let files = collect_files(root, SOURCE_EXTENSIONS)?;
    debug!("Scanning {} files for TODOs", files.len());

    let todos: Vec<TodoItem> = files
        .par_iter()
        .flat_map_iter(|file| {
            let rel = relative_display(root, file);
            match fs::read_to_string(file) {
                Ok(text) => scan_text(&rel, &text),
                Err(e) => {
                    warn!("Failed to read {}: {}", file.display(), e);
                    Vec::new()
                }
            }
        })
        .collect();
    Ok(todos)
}

fn scan_text(rel: &str, text: &str) -> Vec<TodoItem> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| TODO_COMMENT.is_match(line))
        .map(|(i, line)| TodoItem { file: rel.to_string(), line: i + 1, text: line.trim().to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_text() {
        let src = "const a = 1;\n  // TODO: split this\nfoo(); //FIXME - leaks\n// todo lowercase\n";
        let items = scan_text("src/a.ts", src);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], TodoItem { file: "src/a.ts".into(), line: 2, text: "// TODO: split this".into() });
        assert_eq!(items[1].line, 3);
        assert_eq!(items[1].text, "foo(); //FIXME - leaks");
    }

    #[test]
    fn test_collect_orders_by_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::write(root.join("src/b.ts"), "// TODO b").unwrap();
        fs::write(root.join("src/a.js"), "x();\n// FIXME a").unwrap();
        fs::write(root.join("src/c.css"), "/* TODO css */ // TODO css").unwrap();
        fs::write(root.join("node_modules/dep/index.js"), "// TODO vendored").unwrap();

        let todos = collect_todos(root).unwrap();
        let found: Vec<(&str, usize)> = todos.iter().map(|t| (t.file.as_str(), t.line)).collect();
        assert_eq!(found, vec![("src/a.js", 2), ("src/b.ts", 1)]);
    }
}
