use crate::constants::SKIP_DIRS;
use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

/// Walk `root` honoring `.gitignore`, skipping dependency and VCS folders.
/// Only files are returned, sorted by path. An empty `extensions` slice
/// accepts every file.
pub fn collect_files(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_some_and(|t| t.is_dir()) && SKIP_DIRS.contains(&&*name))
        })
        .build();

    let mut files = Vec::new();
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        if extensions.is_empty() {
            files.push(p.to_path_buf());
            continue;
        }
        if let Some(ext) = p.extension().and_then(|e| e.to_str())
            && extensions.contains(&ext)
        {
            trace!("Collected {}", p.display());
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    debug!("Collected {} files", files.len());
    Ok(files)
}

/// Root-relative path with forward slashes
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_skips_node_modules_and_gitignored() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("src/b.ts"), "").unwrap();
        fs::write(root.join("src/a.js"), "").unwrap();
        fs::write(root.join("src/style.css"), "").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(root.join("dist/out.js"), "").unwrap();
        fs::write(root.join(".gitignore"), "dist\n").unwrap();

        let files = collect_files(root, &["ts", "js"]).unwrap();
        let rel: Vec<String> = files.iter().map(|f| relative_display(root, f)).collect();
        assert_eq!(rel, vec!["src/a.js", "src/b.ts"]);
    }

    #[test]
    fn test_no_extension_filter() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("README"), "").unwrap();
        fs::write(tmp.path().join("x.rs"), "").unwrap();
        assert_eq!(collect_files(tmp.path(), &[]).unwrap().len(), 2);
    }
}
