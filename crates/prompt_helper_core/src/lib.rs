//! Core analysis for prompt-helper.
//!
//! This crate scans a JavaScript/TypeScript project and derives:
//! - A file tree restricted to the source directories, with each file's
//!   relative imports and header status
//! - A dependency graph of file path to local import targets
//! - The list of files no other file imports

mod constants;
mod graph;
mod headers;
mod parser;
mod types;
mod unused;
mod walker;

// Re-export public API
pub use constants::{
    ALLOWED_ROOT_DIRECTORIES, CHECK_EXTENSIONS, DEFAULT_ENTRY_POINTS, RESERVED_PREFIX,
    SOURCE_EXTENSIONS,
};
pub use graph::{DependencyGraph, build_dependency_graph, flatten};
pub use headers::{add_header, expected_header, has_correct_header, stamp_header};
pub use parser::{import_requests, local_dependencies, resolve_relative, source_type_for};
pub use types::FileNode;
pub use unused::{entry_points, find_unused_files, inbound_counts, is_config_file};
pub use walker::{WalkOptions, collect_file_tree};

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
    }

    #[test]
    fn test_scan_to_unused_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.ts", "import { b } from './b';\nb();");
        create_test_file(root, "src/b.ts", "export function b() {}");
        create_test_file(root, "src/unused.ts", "export const u = 1;");
        create_test_file(root, "src/app.config.ts", "export default {};");

        let tree = collect_file_tree(root, &WalkOptions { stamp_headers: false });
        let graph = build_dependency_graph(&tree);

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "src/a.ts": ["src/b"],
                "src/app.config.ts": [],
                "src/b.ts": [],
                "src/unused.ts": [],
            })
        );

        let unused = find_unused_files(&graph, &entry_points(None, &["src/a.ts".to_string()]));
        assert_eq!(unused, vec!["src/unused.ts"]);

        // Without a seed for a.ts it is reported too
        let unused = find_unused_files(&graph, &entry_points(None, &[]));
        assert_eq!(unused, vec!["src/a.ts", "src/unused.ts"]);
    }

    #[test]
    fn test_jsx_in_js_project_has_no_unused_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.js", "import App from './App';\nrender(<App />);");
        create_test_file(root, "src/App.js", "export default function App() { return <div/>; }");

        let tree = collect_file_tree(root, &WalkOptions { stamp_headers: false });
        assert!(flatten(&tree).iter().all(|n| n.error.is_none()));

        let graph = build_dependency_graph(&tree);
        assert_eq!(graph.get("src/index.js").unwrap(), ["src/App"]);
        assert!(find_unused_files(&graph, &entry_points(None, &[])).is_empty());
    }

    #[test]
    fn test_graph_keys_match_file_nodes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.tsx", "import App from './App';");
        create_test_file(root, "src/App.jsx", "export default 1;");
        create_test_file(root, "src/styles/site.css", "");
        create_test_file(root, "src/README.md", "");
        create_test_file(root, "public/vendor/lib.js", "");

        let tree = collect_file_tree(root, &WalkOptions { stamp_headers: false });
        let graph = build_dependency_graph(&tree);

        let files: Vec<&str> =
            flatten(&tree).iter().filter(|n| !n.is_directory).map(|n| n.path.as_str()).collect();
        let keys: Vec<&str> = graph.keys().collect();
        assert_eq!(keys, files);
        assert_eq!(
            keys,
            vec!["public/vendor/lib.js", "src/App.jsx", "src/index.tsx", "src/styles/site.css"]
        );
    }
}
