use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use path_clean::clean;
use std::{fs, path::Path};

/// Returns the project-relative targets of every relative import in `file`.
///
/// `rel_path` is the file's own project-relative path. Only static import
/// declarations are recognized; re-exports, `import()` and `require()` are not.
/// The resolved strings are stored as written: no extension is added or removed
/// and nothing is checked against the filesystem.
pub fn local_dependencies(file: &Path, rel_path: &str) -> Result<Vec<String>> {
    trace!("Parsing file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let requests = import_requests(&src, source_type_for(file))
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let deps: Vec<String> = requests
        .iter()
        .filter(|req| req.starts_with('.'))
        .map(|req| {
            let dep = resolve_relative(rel_path, req);
            trace!("Resolved local import '{}' in {} to '{}'", req, rel_path, dep);
            dep
        })
        .collect();

    debug!("Found {} local dependencies in {}", deps.len(), rel_path);
    Ok(deps)
}

/// Module specifiers of all static import declarations, in source order.
pub fn import_requests(src: &str, st: SourceType) -> Result<Vec<String>> {
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, src, st).parse();

    if panicked {
        let first = errors.first().map(|e| e.to_string()).unwrap_or_default();
        return Err(anyhow!("{} syntax error(s): {}", errors.len(), first));
    }
    for e in &errors {
        debug!("Recovered from syntax error: {}", e);
    }

    let mut requests = Vec::new();
    for stmt in &program.body {
        if let Statement::ImportDeclaration(decl) = stmt {
            let req = decl.source.value.to_string();
            trace!("Found static import: '{}'", req);
            requests.push(req);
        }
    }
    Ok(requests)
}

/// Resolves `request` against the directory of `from_rel` and returns the
/// project-relative result with forward slashes. The project root itself is
/// the empty string.
pub fn resolve_relative(from_rel: &str, request: &str) -> String {
    let dir = Path::new(from_rel).parent().unwrap_or(Path::new(""));
    let joined = clean(dir.join(request));
    let s = joined.to_string_lossy().replace('\\', "/");
    if s == "." { String::new() } else { s }
}

pub fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    let typescript = matches!(ext, Some("ts" | "tsx" | "mts" | "cts"));

    // JSX is accepted everywhere except `.ts`, `.mts` and `.cts`
    SourceType::default()
        .with_jsx(!typescript || ext == Some("tsx"))
        .with_typescript(typescript)
        .with_module(true)
}
