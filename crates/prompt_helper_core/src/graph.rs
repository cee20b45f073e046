use log::{debug, trace};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::HashMap;

use crate::types::FileNode;

/// File path → local dependency strings, in scan order.
///
/// Keys are the non-directory paths of the scanned tree. Values are kept as
/// extracted, duplicates included, and need not name a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the dependencies of `path`. A replaced key keeps its
    /// original position.
    pub fn insert(&mut self, path: impl Into<String>, deps: Vec<String>) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&i) => self.entries[i].1 = deps,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, deps));
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.index.get(path).map(|&i| self.entries[i].1.as_slice())
    }

    /// The stored key equal to `path`, borrowed from the graph.
    pub fn key(&self, path: &str) -> Option<&str> {
        self.index.get(path).map(|&i| self.entries[i].0.as_str())
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (k, v) in iter {
            graph.insert(k, v);
        }
        graph
    }
}

impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Pre-order flatten of the forest: every node precedes its children.
pub fn flatten(nodes: &[FileNode]) -> Vec<&FileNode> {
    let mut out = Vec::new();
    flatten_into(nodes, &mut out);
    out
}

fn flatten_into<'a>(nodes: &'a [FileNode], out: &mut Vec<&'a FileNode>) {
    for node in nodes {
        out.push(node);
        if let Some(children) = &node.children {
            flatten_into(children, out);
        }
    }
}

pub fn build_dependency_graph(tree: &[FileNode]) -> DependencyGraph {
    let graph: DependencyGraph = flatten(tree)
        .into_iter()
        .filter(|node| !node.is_directory)
        .map(|node| {
            trace!("Graph node {} -> {:?}", node.path, node.dependencies);
            (node.path.clone(), node.dependencies.clone())
        })
        .collect();
    debug!("Built dependency graph with {} files", graph.len());
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_tree() -> Vec<FileNode> {
        vec![
            FileNode::file("index.ts", "index.ts", deps(&["src/app"])),
            FileNode::directory(
                "src",
                "src",
                vec![
                    FileNode::file("app.ts", "src/app.ts", deps(&["src/lib", "src/lib"])),
                    FileNode::directory(
                        "lib",
                        "src/lib",
                        vec![FileNode::file("index.ts", "src/lib/index.ts", vec![])],
                    ),
                    FileNode::file("z.css", "src/z.css", vec![]),
                ],
            ),
        ]
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let tree = sample_tree();
        let paths: Vec<&str> = flatten(&tree).iter().map(|n| n.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["index.ts", "src/", "src/app.ts", "src/lib/", "src/lib/index.ts", "src/z.css"]
        );
    }

    #[test]
    fn test_directories_never_keys() {
        let graph = build_dependency_graph(&sample_tree());
        let keys: Vec<&str> = graph.keys().collect();
        assert_eq!(keys, vec!["index.ts", "src/app.ts", "src/lib/index.ts", "src/z.css"]);
        assert!(!graph.contains_key("src/"));
        assert!(!graph.contains_key("src/lib/"));
    }

    #[test]
    fn test_values_keep_duplicates_and_order() {
        let graph = build_dependency_graph(&sample_tree());
        assert_eq!(graph.get("src/app.ts").unwrap(), &deps(&["src/lib", "src/lib"])[..]);
        assert_eq!(graph.get("src/z.css").unwrap(), &[] as &[String]);
    }

    #[test]
    fn test_error_nodes_become_empty_entries() {
        let tree = vec![FileNode::failed("broken.ts", "src/broken.ts", "EACCES")];
        let graph = build_dependency_graph(&tree);
        assert_eq!(graph.get("src/broken.ts").unwrap().len(), 0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let tree = sample_tree();
        assert_eq!(build_dependency_graph(&tree), build_dependency_graph(&tree));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let graph = build_dependency_graph(&sample_tree());
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(
            json,
            r#"{"index.ts":["src/app"],"src/app.ts":["src/lib","src/lib"],"src/lib/index.ts":[],"src/z.css":[]}"#
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut graph = DependencyGraph::new();
        graph.insert("b.ts", deps(&["a"]));
        graph.insert("a.ts", vec![]);
        graph.insert("b.ts", deps(&["c"]));
        let keys: Vec<&str> = graph.keys().collect();
        assert_eq!(keys, vec!["b.ts", "a.ts"]);
        assert_eq!(graph.get("b.ts").unwrap(), &deps(&["c"])[..]);
    }
}
