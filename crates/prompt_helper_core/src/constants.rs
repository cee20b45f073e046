//! Constants for file extensions, scan boundaries and entry points.
//!
//! The tree walker only emits files whose extension is listed in
//! [`CHECK_EXTENSIONS`]; of those, only [`SOURCE_EXTENSIONS`] are parsed for
//! imports. Stylesheets are listed in the tree but never parsed.

/// File extensions emitted by the tree walker
pub const CHECK_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "css"];

/// Extensions parsed for import declarations
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Extensions stripped when building the unused-file lookup table (in priority order)
pub const STRIP_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "mts", "cts", "mjs", "cjs"];

/// Root-level directories the walker descends into
pub const ALLOWED_ROOT_DIRECTORIES: &[&str] = &["public", "src"];

/// Root-level entries starting with this prefix are never scanned
pub const RESERVED_PREFIX: &str = "promptHelper";

/// Entry points credited with one inbound reference before unused detection
pub const DEFAULT_ENTRY_POINTS: &[&str] = &["src/index"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_extensions_are_checked() {
        for ext in SOURCE_EXTENSIONS {
            assert!(
                CHECK_EXTENSIONS.contains(ext),
                "SOURCE_EXTENSIONS contains '{}' which is not in CHECK_EXTENSIONS",
                ext
            );
        }
    }

    #[test]
    fn test_stylesheets_are_not_parsed() {
        assert!(CHECK_EXTENSIONS.contains(&"css"));
        assert!(!SOURCE_EXTENSIONS.contains(&"css"));
    }

    #[test]
    fn test_strip_extensions_cover_source_extensions() {
        for ext in SOURCE_EXTENSIONS {
            assert!(STRIP_EXTENSIONS.contains(ext), "STRIP_EXTENSIONS missing '{}'", ext);
        }
    }
}
