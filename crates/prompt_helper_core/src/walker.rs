use log::{debug, error, trace, warn};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    constants::{ALLOWED_ROOT_DIRECTORIES, CHECK_EXTENSIONS, RESERVED_PREFIX, SOURCE_EXTENSIONS},
    headers::{add_header, has_correct_header},
    parser::local_dependencies,
    types::FileNode,
};

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Write missing path headers into files as they are scanned
    pub stamp_headers: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self { stamp_headers: true }
    }
}

/// Scans `root` depth-first and returns the file forest.
///
/// At the root only the allow-listed directories are entered and entries with
/// the reserved prefix are skipped. Read and stat failures become error nodes;
/// they never abort the scan.
pub fn collect_file_tree(root: &Path, opts: &WalkOptions) -> Vec<FileNode> {
    debug!("Walking file tree from root: {}", root.display());
    let nodes = walk_dir(root, root, opts);
    debug!("Collected {} top-level nodes", nodes.len());
    nodes
}

fn walk_dir(dir: &Path, root: &Path, opts: &WalkOptions) -> Vec<FileNode> {
    let names = match read_dir_names(dir) {
        Ok(names) => names,
        Err(e) => {
            warn!("Failed to read directory {}: {}", dir.display(), e);
            let name = dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            return vec![FileNode::failed(&name, &relative_path(root, dir), e.to_string())];
        }
    };

    let at_root = dir == root;
    let mut nodes = Vec::with_capacity(names.len());

    for name in names {
        if at_root && name.starts_with(RESERVED_PREFIX) {
            trace!("Skipping reserved root entry: {}", name);
            continue;
        }

        let abs = dir.join(&name);
        let rel = relative_path(root, &abs);

        let meta = match fs::metadata(&abs) {
            Ok(meta) => meta,
            // Only entries that would have been emitted as files are reported
            Err(e) if has_extension(&abs, CHECK_EXTENSIONS) => {
                warn!("Failed to stat {}: {}", abs.display(), e);
                nodes.push(FileNode::failed(&name, &rel, e.to_string()));
                continue;
            }
            Err(e) => {
                trace!("Skipping unreadable untracked entry {}: {}", rel, e);
                continue;
            }
        };

        if meta.is_dir() {
            if at_root && !ALLOWED_ROOT_DIRECTORIES.contains(&name.as_str()) {
                trace!("Skipping root directory outside allow-list: {}", name);
                continue;
            }
            let children = walk_dir(&abs, root, opts);
            nodes.push(FileNode::directory(&name, &rel, children));
        } else if has_extension(&abs, CHECK_EXTENSIONS) {
            nodes.push(scan_file(&abs, &name, &rel, opts));
        } else {
            trace!("Skipping untracked file: {}", rel);
        }
    }

    nodes
}

fn scan_file(abs: &Path, name: &str, rel: &str, opts: &WalkOptions) -> FileNode {
    let mut node = FileNode::file(name, rel, Vec::new());

    if has_extension(abs, SOURCE_EXTENSIONS) {
        match local_dependencies(abs, rel) {
            Ok(deps) => node.dependencies = deps,
            Err(e) => {
                warn!("Could not extract imports from {}: {:#}", rel, e);
                node.error = Some(format!("{:#}", e));
            }
        }
    }

    if !has_correct_header(abs, rel) {
        node.missing_header = true;
        if opts.stamp_headers
            && let Err(e) = add_header(abs, rel)
        {
            error!("Error inserting header into file: {:#}", e);
        }
    }

    node
}

/// Entry names of `dir` in byte order.
fn read_dir_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| extensions.contains(&ext))
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel: PathBuf = path.strip_prefix(root).map(Path::to_path_buf).unwrap_or_default();
    rel.to_string_lossy().replace('\\', "/")
}
