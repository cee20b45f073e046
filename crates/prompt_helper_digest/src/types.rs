use prompt_helper_core::{DependencyGraph, FileNode};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, path::PathBuf};

/// The fields of `package.json` the digest reports on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<Bin>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

/// `bin` is either a single script path or a map of command names to paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bin {
    Path(String),
    Commands(BTreeMap<String, String>),
}

/// `extends` takes one base config or, since TypeScript 5.0, a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Extends::One(p) => vec![p.as_str()],
            Extends::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub path: String,
}

/// A merged `tsconfig.json`. Fields outside this set are dropped on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tsconfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ProjectReference>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        };
        f.write_str(name)
    }
}

/// Tooling detected from well-known files at the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,
    pub uses_eslint: bool,
    pub uses_webpack: bool,
    pub uses_vite: bool,
    pub uses_babel: bool,
    pub uses_jest: bool,
    pub uses_docker: bool,
    pub uses_github_actions: bool,
    pub uses_travis: bool,
    pub uses_circle_ci: bool,
    pub uses_jenkins: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSnippet {
    pub file: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoItem {
    pub file: String,
    pub line: usize,
    pub text: String,
}

/// McCabe bands for cyclomatic complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Assessment {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl Assessment {
    pub fn from_cyclomatic(cyclomatic: usize) -> Self {
        match cyclomatic {
            0..=10 => Assessment::Simple,
            11..=20 => Assessment::Moderate,
            21..=50 => Assessment::Complex,
            _ => Assessment::VeryComplex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Assessment::Simple => "Simple",
            Assessment::Moderate => "Moderate",
            Assessment::Complex => "Complex",
            Assessment::VeryComplex => "Very complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetrics {
    pub file_name: String,
    pub cyclomatic: usize,
    pub line_count: usize,
    pub assessment: Assessment,
}

/// Everything gathered in one run, ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub base_dir: PathBuf,
    pub tree: Vec<FileNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_json: Option<PackageJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig_json: Option<Tsconfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_text: Option<String>,
    #[serde(flatten)]
    pub tools: ToolInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub code_snippets: Vec<CodeSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<TodoItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<FileMetrics>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_graph: Option<DependencyGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unused_files: Option<Vec<String>>,
}

impl ProjectReport {
    /// Number of non-directory nodes in the scanned tree
    pub fn file_count(&self) -> usize {
        prompt_helper_core::flatten(&self.tree).iter().filter(|n| !n.is_directory).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_json_drops_unknown_fields() {
        let pkg: PackageJson = serde_json::from_str(
            r#"{"name": "demo", "type": "module", "scripts": {"build": "tsc"}, "bin": "cli.js"}"#,
        )
        .unwrap();
        assert_eq!(pkg.name.as_deref(), Some("demo"));
        assert_eq!(pkg.module_type.as_deref(), Some("module"));
        assert_eq!(pkg.bin, Some(Bin::Path("cli.js".to_string())));
        assert!(pkg.dependencies.is_empty());
    }

    #[test]
    fn test_bin_map() {
        let pkg: PackageJson =
            serde_json::from_str(r#"{"bin": {"a": "bin/a.js", "b": "bin/b.js"}}"#).unwrap();
        match pkg.bin {
            Some(Bin::Commands(map)) => assert_eq!(map.len(), 2),
            other => panic!("unexpected bin: {:?}", other),
        }
    }

    #[test]
    fn test_extends_forms() {
        let one: Tsconfig = serde_json::from_str(r#"{"extends": "./base.json"}"#).unwrap();
        assert_eq!(one.extends.unwrap().paths(), vec!["./base.json"]);
        let many: Tsconfig = serde_json::from_str(r#"{"extends": ["./a.json", "./b.json"]}"#).unwrap();
        assert_eq!(many.extends.unwrap().paths(), vec!["./a.json", "./b.json"]);
    }

    #[test]
    fn test_assessment_bands() {
        assert_eq!(Assessment::from_cyclomatic(1), Assessment::Simple);
        assert_eq!(Assessment::from_cyclomatic(10), Assessment::Simple);
        assert_eq!(Assessment::from_cyclomatic(11), Assessment::Moderate);
        assert_eq!(Assessment::from_cyclomatic(50), Assessment::Complex);
        assert_eq!(Assessment::from_cyclomatic(51), Assessment::VeryComplex);
    }

    #[test]
    fn test_tool_info_serializes_camel_case() {
        let tools = ToolInfo {
            package_manager: Some(PackageManager::Pnpm),
            uses_github_actions: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&tools).unwrap();
        assert_eq!(json["packageManager"], "pnpm");
        assert_eq!(json["usesGithubActions"], true);
        assert_eq!(json["usesCircleCi"], false);
    }
}
