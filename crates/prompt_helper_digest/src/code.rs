use crate::{
    collector::{collect_files, relative_display},
    types::CodeSnippet,
};
use anyhow::{Context, Result, anyhow};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::{debug, info};
use std::{
    fs,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

/// Gather the contents of every `--code` path. Directories expand to all of
/// their files; files whose root-relative path matches an `--ignore` glob are
/// dropped. An unresolvable or ambiguous path is an error.
pub fn collect_code(root: &Path, code_paths: &[String], ignore: &[String]) -> Result<Vec<CodeSnippet>> {
    if code_paths.is_empty() {
        return Ok(Vec::new());
    }
    let ignore = build_ignore_set(ignore)?;

    let mut snippets = Vec::new();
    for cp in code_paths {
        let resolved = resolve_code_path(root, cp)?;
        let files =
            if resolved.is_dir() { collect_files(&resolved, &[])? } else { vec![resolved] };

        for file in files {
            let rel = relative_display(root, &file);
            if ignore.is_match(&rel) {
                debug!("Ignoring code file {}", rel);
                continue;
            }
            let code = fs::read_to_string(&file)
                .with_context(|| format!("Error reading code file \"{}\"", file.display()))?;
            snippets.push(CodeSnippet { file: rel, code });
        }
    }
    info!("Collected {} code snippets", snippets.len());
    Ok(snippets)
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid ignore pattern \"{}\"", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn resolve_code_path(root: &Path, cp: &str) -> Result<PathBuf> {
    let candidate = if Path::new(cp).is_absolute() { PathBuf::from(cp) } else { root.join(cp) };
    if candidate.exists() {
        return Ok(candidate);
    }
    if cp.contains(MAIN_SEPARATOR) || cp.contains('/') {
        return Err(anyhow!(
            "Code path \"{}\" not found at resolved path \"{}\".",
            cp,
            candidate.display()
        ));
    }

    // Bare file name: search the whole project
    let mut matches: Vec<PathBuf> = collect_files(root, &[])?
        .into_iter()
        .filter(|f| f.file_name().is_some_and(|n| n == cp))
        .collect();
    match matches.len() {
        0 => Err(anyhow!("Code file or directory \"{}\" not found.", cp)),
        1 => Ok(matches.remove(0)),
        _ => Err(anyhow!("Ambiguous code path \"{}\" found in multiple locations.", cp)),
    }
}
