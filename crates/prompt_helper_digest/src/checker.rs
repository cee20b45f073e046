use anyhow::Result;
use log::{debug, info};
use prompt_helper_core::{
    WalkOptions, build_dependency_graph, collect_file_tree, entry_points, find_unused_files,
};

use crate::{
    code::collect_code,
    config::Config,
    metrics::collect_metrics,
    notes::{read_notes, read_style},
    package_json::read_package_json,
    todos::collect_todos,
    tools::detect_tools,
    tsconfig::read_tsconfig,
    types::ProjectReport,
};

/// Run every collector the configuration asks for and assemble the report.
pub fn collect_project_report(cfg: &Config) -> Result<ProjectReport> {
    let root = cfg.root()?;
    info!("Collecting project info from {}", root.display());

    let opts = WalkOptions { stamp_headers: !cfg.no_stamp_headers };
    let tree = collect_file_tree(root, &opts);

    let package_json = read_package_json(root);
    let tsconfig_json = read_tsconfig(root);
    let tools = detect_tools(root);
    let other_notes = read_notes(root);
    let style_text = read_style(root, cfg.style.as_deref());
    let code_snippets = collect_code(root, &cfg.code, &cfg.ignore)?;

    let todos = if cfg.todos { Some(collect_todos(root)?) } else { None };
    let metrics = if cfg.complexity { Some(collect_metrics(root)?) } else { None };

    let (dependency_graph, unused_files) = if cfg.dependency_graph {
        let graph = build_dependency_graph(&tree);
        let main = package_json.as_ref().and_then(|p| p.main.as_deref());
        let seeds = entry_points(main, &cfg.entries);
        debug!("Entry points: {:?}", seeds);
        let unused = find_unused_files(&graph, &seeds);
        info!("Dependency graph has {} files, {} unused", graph.len(), unused.len());
        (Some(graph), Some(unused))
    } else {
        (None, None)
    };

    Ok(ProjectReport {
        base_dir: root.clone(),
        tree,
        package_json,
        tsconfig_json,
        other_notes,
        style_text,
        tools,
        code_snippets,
        todos,
        metrics,
        dependency_graph,
        unused_files,
    })
}
