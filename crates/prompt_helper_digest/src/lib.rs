//! Project digest for prompt-helper.
//!
//! Builds on the scan from `prompt_helper_core` and adds the project metadata
//! around it: package.json, merged tsconfig, detected tooling, notes and
//! style text, code snippets, TODO comments and complexity metrics. The
//! result is rendered as a markdown document and optionally a JSON manifest.

mod checker;
mod code;
mod collector;
mod config;
mod constants;
mod manifest;
mod metrics;
mod notes;
mod package_json;
mod reporter;
mod todos;
mod tools;
mod tsconfig;
mod types;

// Re-export public API
pub use checker::collect_project_report;
pub use code::collect_code;
pub use collector::collect_files;
pub use config::Config;
pub use manifest::write_json_manifest;
pub use metrics::{collect_metrics, cyclomatic_complexity};
pub use notes::{read_notes, read_style};
pub use package_json::read_package_json;
pub use reporter::{print_summary, write_markdown};
pub use todos::collect_todos;
pub use tools::detect_tools;
pub use tsconfig::{read_tsconfig, strip_jsonc};
pub use types::{
    Assessment, Bin, CodeSnippet, Extends, FileMetrics, PackageJson, PackageManager,
    ProjectReference, ProjectReport, TodoItem, ToolInfo, Tsconfig,
};
