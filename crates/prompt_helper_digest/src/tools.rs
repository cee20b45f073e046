use crate::types::{PackageManager, ToolInfo};
use log::{debug, warn};
use std::{fs, path::Path};

const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("package-lock.json", PackageManager::Npm),
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
];

const ESLINT_FILES: &[&str] =
    &[".eslintrc.js", ".eslintrc.json", "eslint.config.js", "eslint.config.mjs"];
const BABEL_FILES: &[&str] = &[".babelrc", "babel.config.js"];
const WEBPACK_FILES: &[&str] = &["webpack.config.js", "webpack.config.ts"];
const VITE_FILES: &[&str] = &["vite.config.js", "vite.config.ts"];
const JEST_FILES: &[&str] = &["jest.config.js", "jest.config.json", "jest.config.ts"];

/// Detect the package manager and build/test/CI tooling from well-known
/// files at the project root.
pub fn detect_tools(root: &Path) -> ToolInfo {
    let any = |names: &[&str]| names.iter().any(|n| root.join(n).exists());

    let package_manager = LOCK_FILES
        .iter()
        .find(|(file, _)| root.join(file).is_file())
        .map(|(_, pm)| *pm);

    let tools = ToolInfo {
        package_manager,
        uses_eslint: any(ESLINT_FILES),
        uses_webpack: any(WEBPACK_FILES),
        uses_vite: any(VITE_FILES),
        uses_babel: any(BABEL_FILES),
        uses_jest: any(JEST_FILES),
        uses_docker: has_dockerfile(root),
        uses_github_actions: root.join(".github/workflows").is_dir(),
        uses_travis: root.join(".travis.yml").is_file(),
        uses_circle_ci: root.join(".circleci/config.yml").is_file(),
        uses_jenkins: root.join("Jenkinsfile").is_file(),
    };
    debug!("Detected tools: {:?}", tools);
    tools
}

fn has_dockerfile(root: &Path) -> bool {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to list {}: {}", root.display(), e);
            return false;
        }
    };
    entries
        .flatten()
        .any(|e| e.file_name().to_string_lossy().to_lowercase().starts_with("dockerfile"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_project() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(detect_tools(tmp.path()), ToolInfo::default());
    }

    #[test]
    fn test_detects_tooling() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for file in ["yarn.lock", "eslint.config.mjs", "vite.config.ts", "Dockerfile.dev", "Jenkinsfile"] {
            fs::write(root.join(file), "").unwrap();
        }
        fs::create_dir_all(root.join(".github/workflows")).unwrap();

        let tools = detect_tools(root);
        assert_eq!(tools.package_manager, Some(PackageManager::Yarn));
        assert!(tools.uses_eslint);
        assert!(tools.uses_vite);
        assert!(tools.uses_docker);
        assert!(tools.uses_github_actions);
        assert!(tools.uses_jenkins);
        assert!(!tools.uses_webpack);
        assert!(!tools.uses_travis);
    }

    #[test]
    fn test_npm_lock_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pnpm-lock.yaml"), "").unwrap();
        fs::write(tmp.path().join("package-lock.json"), "{}").unwrap();
        assert_eq!(detect_tools(tmp.path()).package_manager, Some(PackageManager::Npm));
    }
}
