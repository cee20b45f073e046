//! Unused-file detection by inbound reference counting.
//!
//! Every dependency string in the graph credits one inbound reference to the
//! file it names, either verbatim or through the lookup table of
//! extension-less and index-folder aliases. Files left at zero are unused.
//!
//! This is a single pass over direct references, not a reachability walk: a
//! group of files that only import each other is never reported, even when no
//! entry point reaches it.

use log::{debug, trace};
use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

use crate::{
    constants::{DEFAULT_ENTRY_POINTS, STRIP_EXTENSIONS},
    graph::DependencyGraph,
};

static CONFIG_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(config|settings)\.[jt]sx?$").expect("valid regex"));

/// Build, lint and framework config files are entry points of their own tools.
pub fn is_config_file(path: &str) -> bool {
    CONFIG_FILE.is_match(path)
}

/// The default entry points plus the package `main` field and any extra paths.
pub fn entry_points(main: Option<&str>, extra: &[String]) -> Vec<String> {
    let mut seeds: Vec<String> = DEFAULT_ENTRY_POINTS.iter().map(|s| s.to_string()).collect();
    seeds.extend(main.map(str::to_string));
    seeds.extend(extra.iter().cloned());
    seeds
}

fn strip_source_extension(path: &str) -> &str {
    for ext in STRIP_EXTENSIONS {
        if let Some(base) = path.strip_suffix(ext).and_then(|p| p.strip_suffix('.')) {
            return base;
        }
    }
    path
}

/// `\` to `/`, no leading `./`, no trailing `/`.
fn normalize_reference(reference: &str) -> String {
    let mut s = reference.replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    while s.len() > 1 && s.ends_with('/') {
        s.pop();
    }
    s
}

/// Maps extension-less paths, and folders of `index` files, to graph keys.
struct Lookup<'g> {
    aliases: HashMap<String, &'g str>,
}

impl<'g> Lookup<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        let mut aliases = HashMap::new();
        for key in graph.keys() {
            let base = strip_source_extension(key);
            aliases.insert(base.to_string(), key);
            if let Some(dir) = base.strip_suffix("/index") {
                aliases.insert(dir.to_string(), key);
            }
        }
        trace!("Built lookup table with {} aliases", aliases.len());
        Self { aliases }
    }

    /// The graph key a reference points at, if any.
    fn resolve(&self, graph: &'g DependencyGraph, reference: &str) -> Option<&'g str> {
        let normalized = normalize_reference(reference);
        if let Some(key) = graph.key(&normalized) {
            return Some(key);
        }
        self.aliases.get(strip_source_extension(&normalized)).copied()
    }
}

/// Inbound reference counts for every graph key, with each seed credited once.
pub fn inbound_counts<'g>(graph: &'g DependencyGraph, seeds: &[String]) -> HashMap<&'g str, usize> {
    let mut counts: HashMap<&str, usize> = graph.keys().map(|k| (k, 0)).collect();
    let lookup = Lookup::new(graph);

    let references = graph.iter().flat_map(|(_, deps)| deps.iter()).chain(seeds.iter());
    for reference in references {
        match lookup.resolve(graph, reference) {
            Some(key) => {
                if let Some(count) = counts.get_mut(key) {
                    *count += 1;
                }
            }
            None => trace!("Unresolved reference '{}'", reference),
        }
    }

    counts
}

/// Files with no inbound references, excluding seeds and config files, in
/// graph order.
pub fn find_unused_files(graph: &DependencyGraph, seeds: &[String]) -> Vec<String> {
    let counts = inbound_counts(graph, seeds);

    let unused: Vec<String> = graph
        .keys()
        .filter(|k| counts.get(k).copied().unwrap_or(0) == 0 && !is_config_file(k))
        .map(str::to_string)
        .collect();

    debug!("Found {} unused files out of {}", unused.len(), graph.len());
    unused
}
