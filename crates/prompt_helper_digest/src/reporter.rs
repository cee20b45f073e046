use std::{
    env,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::{debug, trace};
use prompt_helper_core::FileNode;

use crate::{
    constants::{INSTRUCTIONS, SECTION},
    types::{Assessment, FileMetrics, ProjectReport},
};

const ASSESSMENT_BANDS: &[(&str, Assessment)] = &[
    ("1 - 10", Assessment::Simple),
    ("11 - 20", Assessment::Moderate),
    ("21 - 50", Assessment::Complex),
    ("> 50", Assessment::VeryComplex),
];

fn fenced(code: &str, lang: &str) -> String {
    format!("```{}\n{}\n```", lang, code)
}

/// Render the whole markdown digest
pub fn write_markdown<W: Write>(writer: &mut W, report: &ProjectReport) -> io::Result<()> {
    debug!("Rendering markdown for {}", report.base_dir.display());
    match report.package_json.as_ref().and_then(|p| p.name.as_deref()) {
        Some(name) => writeln!(writer, "# Project: {}", name)?,
        None => writeln!(writer, "# Project Info:")?,
    }

    write_tree(writer, report)?;
    write_project_info(writer, report)?;
    write_instructions(writer, report)?;
    writer.flush()
}

fn write_tree<W: Write>(writer: &mut W, report: &ProjectReport) -> io::Result<()> {
    let base = report.base_dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    writeln!(writer, "\n## Directory Structure:\n")?;
    writeln!(writer, "```markdown")?;
    writeln!(writer, "{}/", base)?;
    write_tree_nodes(writer, &report.tree, "")?;
    writeln!(writer, "```")
}

fn write_tree_nodes<W: Write>(writer: &mut W, nodes: &[FileNode], prefix: &str) -> io::Result<()> {
    for (idx, node) in nodes.iter().enumerate() {
        let is_last = idx == nodes.len() - 1;
        let pointer = if is_last { "└── " } else { "├── " };
        let mut line = format!("{}{}{}", prefix, pointer, node.name);
        if !node.dependencies.is_empty() {
            line.push_str(&format!(" (Depends on: {})", node.dependencies.join(", ")));
        }

        // Error nodes are never descended into
        if let Some(error) = &node.error {
            writeln!(writer, "{} [Error: {}]", line, error)?;
            continue;
        }
        writeln!(writer, "{}", line)?;

        if let Some(children) = &node.children
            && !children.is_empty()
        {
            let next = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            write_tree_nodes(writer, children, &next)?;
        }
    }
    Ok(())
}

fn write_project_info<W: Write>(writer: &mut W, report: &ProjectReport) -> io::Result<()> {
    match &report.package_json {
        Some(pkg) => {
            writeln!(writer, "\n## Package.json info:")?;
            writeln!(writer, "### Type: {}", pkg.module_type.as_deref().unwrap_or("Not specified"))?;
            for (title, deps) in
                [("Dependencies", &pkg.dependencies), ("DevDependencies", &pkg.dev_dependencies)]
            {
                writeln!(writer, "### {}:", title)?;
                if deps.is_empty() {
                    writeln!(writer, "  None")?;
                }
                for (dep, ver) in deps {
                    writeln!(writer, "  {}: {}", dep, ver)?;
                }
            }
        }
        None => writeln!(writer, "\n## No package.json found.")?,
    }

    match &report.tsconfig_json {
        Some(ts) => {
            writeln!(writer, "\n## tsconfig.json and referenced configs found:")?;
            if let Some(opts) = &ts.compiler_options {
                writeln!(writer, "### CompilerOptions:")?;
                for (key, value) in opts {
                    writeln!(writer, "  {}: {}", key, value)?;
                }
            }
            for (title, items) in [("Include", &ts.include), ("Exclude", &ts.exclude), ("Files", &ts.files)]
            {
                if let Some(items) = items {
                    writeln!(writer, "### {}:", title)?;
                    for item in items {
                        writeln!(writer, "  {}", item)?;
                    }
                }
            }
            if let Some(refs) = &ts.references {
                writeln!(writer, "### References:")?;
                for r in refs {
                    writeln!(writer, "  {{\"path\":{}}}", serde_json::Value::from(r.path.as_str()))?;
                }
            }
        }
        None => writeln!(writer, "\n## tsconfig.json not found.")?,
    }

    let tools = &report.tools;
    writeln!(writer, "\n## Project Info:")?;
    match tools.package_manager {
        Some(pm) => writeln!(writer, "- Package manager detected: {}", pm)?,
        None => writeln!(writer, "- No package manager lock file detected.")?,
    }
    if tools.uses_eslint {
        writeln!(writer, "- Project uses ESLint.")?;
    } else {
        writeln!(writer, "- Project does not use ESLint.")?;
    }
    let detected = [
        (tools.uses_vite, "Vite"),
        (tools.uses_webpack, "Webpack"),
        (tools.uses_babel, "Babel"),
        (tools.uses_jest, "Jest"),
        (tools.uses_docker, "Docker"),
        (tools.uses_github_actions, "GitHub Actions"),
        (tools.uses_travis, "Travis CI"),
        (tools.uses_circle_ci, "CircleCI"),
        (tools.uses_jenkins, "Jenkins"),
    ];
    for (_, name) in detected.iter().filter(|(used, _)| *used) {
        writeln!(writer, "- Project uses {}.", name)?;
    }
    Ok(())
}

fn write_instructions<W: Write>(writer: &mut W, report: &ProjectReport) -> io::Result<()> {
    writeln!(writer, "{}", SECTION)?;
    writeln!(writer, "## Style:")?;
    if let Some(style) = &report.style_text {
        writeln!(writer, "{}", style)?;
    }
    writeln!(writer, "{}", SECTION)?;
    writeln!(writer, "## Other Notes:")?;
    writeln!(writer, "{}", report.other_notes.as_deref().unwrap_or("- (none)"))?;

    if let Some(todos) = &report.todos
        && !todos.is_empty()
    {
        writeln!(writer, "{}", SECTION)?;
        writeln!(writer, "## TODOs & FIXMEs:")?;
        for item in todos {
            writeln!(writer, "- {}:{} → {}", item.file, item.line, item.text)?;
        }
    }

    if let Some(graph) = &report.dependency_graph {
        let json = serde_json::to_string_pretty(graph).map_err(io::Error::other)?;
        writeln!(writer, "{}", SECTION)?;
        writeln!(writer, "## Dependency Graph (JSON):")?;
        writeln!(writer, "{}", fenced(&json, "json"))?;
    }

    if let Some(unused) = &report.unused_files
        && !unused.is_empty()
    {
        writeln!(writer, "{}", SECTION)?;
        writeln!(writer, "## Unused Files:")?;
        for file in unused {
            writeln!(writer, "- {}", file)?;
        }
    }

    if let Some(metrics) = &report.metrics
        && !metrics.is_empty()
    {
        writeln!(writer, "{}", SECTION)?;
        write_metrics(writer, metrics)?;
    }

    writeln!(writer, "{}", SECTION)?;
    writeln!(writer, "## Code:")?;
    if report.code_snippets.is_empty() {
        writeln!(writer, "{}", fenced("[Include code snippets or references via `--code` flag]", ""))?;
    }
    for snip in &report.code_snippets {
        writeln!(writer, "\n### {}", snip.file)?;
        writeln!(writer, "{}", fenced(&snip.code, ""))?;
    }

    writeln!(writer, "{}", SECTION)?;
    writeln!(writer, "## Instructions:")?;
    for line in INSTRUCTIONS {
        writeln!(writer, "- {}", line)?;
    }
    Ok(())
}

fn write_metrics<W: Write>(writer: &mut W, metrics: &[FileMetrics]) -> io::Result<()> {
    trace!("Rendering metrics table for {} files", metrics.len());
    let assess_w =
        metrics.iter().map(|m| m.assessment.label().len()).max().unwrap_or(0).max("Assessment".len());
    let file_w = metrics.iter().map(|m| m.file_name.len()).max().unwrap_or(0).max("File Name".len());

    writeln!(writer, "## Complexity & Metrics:\n")?;
    writeln!(writer, "| Cyclomatic |{:^14}|", "Assessment")?;
    writeln!(writer, "|------------|--------------|")?;
    for (range, band) in ASSESSMENT_BANDS {
        writeln!(writer, "|{:^12}| {:<12} |", range, band.label())?;
    }

    writeln!(writer)?;
    writeln!(writer, "|  C  |   L   |{:^aw$}|{:^fw$}|", "Assessment", "File Name", aw = assess_w + 2, fw = file_w + 2)?;
    writeln!(writer, "|-----|-------|{}|{}|", "-".repeat(assess_w + 2), "-".repeat(file_w + 2))?;
    for m in metrics {
        writeln!(
            writer,
            "| {:>3} | {:>5} | {:^aw$} | {:^fw$} |",
            m.cyclomatic,
            m.line_count,
            m.assessment.label(),
            m.file_name,
            aw = assess_w,
            fw = file_w
        )?;
    }
    Ok(())
}

/// Path relative to the working directory when it lies below it
fn display_path(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// One-line-per-artifact terminal summary printed after writing
pub fn print_summary<W: Write>(
    writer: &mut W,
    report: &ProjectReport,
    markdown: &Path,
    json: Option<&Path>,
) -> io::Result<()> {
    writeln!(writer, "{} Markdown written to: {}", "✓".green().bold(), display_path(markdown).blue())?;
    if let Some(json) = json {
        writeln!(writer, "{} JSON manifest written to: {}", "✓".green().bold(), display_path(json).blue())?;
    }

    let errors = prompt_helper_core::flatten(&report.tree).iter().filter(|n| n.error.is_some()).count();
    if errors > 0 {
        writeln!(writer, "{} {} files could not be scanned", "⚠".yellow().bold(), errors.to_string().yellow())?;
    }
    let missing = prompt_helper_core::flatten(&report.tree).iter().filter(|n| n.missing_header).count();
    if missing > 0 {
        writeln!(writer, "{} {} files were missing a path header", "⚠".yellow().bold(), missing.to_string().yellow())?;
    }
    if let Some(unused) = &report.unused_files
        && !unused.is_empty()
    {
        writeln!(writer, "{} {} unused files", "⚠".yellow().bold(), unused.len().to_string().yellow())?;
    }
    writer.flush()
}
