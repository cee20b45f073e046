use serde::Serialize;

/// One entry of the scanned file tree.
///
/// Directory nodes own their children and carry a trailing `/` on both `name`
/// and `path`. Nodes whose directory read or stat failed are reported as
/// non-directories with `error` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub name: String,
    /// Project-relative path with forward slashes
    pub path: String,
    pub is_directory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub missing_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileNode {
    pub fn directory(name: &str, path: &str, children: Vec<FileNode>) -> Self {
        Self {
            name: format!("{}/", name),
            path: format!("{}/", path),
            is_directory: true,
            children: Some(children),
            dependencies: Vec::new(),
            missing_header: false,
            error: None,
        }
    }

    pub fn file(name: &str, path: &str, dependencies: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            is_directory: false,
            children: None,
            dependencies,
            missing_header: false,
            error: None,
        }
    }

    pub fn failed(name: &str, path: &str, error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::file(name, path, Vec::new()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_node_has_trailing_slash() {
        let node = FileNode::directory("src", "src", vec![]);
        assert_eq!(node.name, "src/");
        assert_eq!(node.path, "src/");
        assert!(node.is_directory);
        assert_eq!(node.children, Some(vec![]));
    }

    #[test]
    fn test_serialize_omits_empty_fields() {
        let node = FileNode::file("a.ts", "src/a.ts", vec![]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({"name": "a.ts", "path": "src/a.ts", "isDirectory": false}));
    }

    #[test]
    fn test_serialize_failed_node() {
        let node = FileNode::failed("broken", "src/broken", "permission denied");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["error"], "permission denied");
        assert_eq!(json["isDirectory"], false);
        assert!(json.get("dependencies").is_none());
    }

    #[test]
    fn test_serialize_missing_header_flag() {
        let mut node = FileNode::file("a.ts", "src/a.ts", vec!["src/b".to_string()]);
        node.missing_header = true;
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["missingHeader"], true);
        assert_eq!(json["dependencies"], serde_json::json!(["src/b"]));
    }
}
