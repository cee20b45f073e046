use crate::types::{ProjectReference, Tsconfig};
use anyhow::{Context, Result};
use log::{debug, warn};
use path_clean::clean;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// Load `tsconfig.json` from the root with its `extends` chain and project
/// references merged in. Returns `None` when the root has no tsconfig.
pub fn read_tsconfig(root: &Path) -> Option<Tsconfig> {
    let path = root.join("tsconfig.json");
    if !path.is_file() {
        debug!("No tsconfig.json at {}", path.display());
        return None;
    }
    let mut visited = HashSet::new();
    Some(load_merged(&path, &mut visited))
}

/// Load one config and everything it pulls in. Configs already in `visited`
/// resolve to an empty config so cycles terminate.
fn load_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Tsconfig {
    let key = clean(path);
    if !visited.insert(key.clone()) {
        debug!("tsconfig cycle at {}", key.display());
        return Tsconfig::default();
    }

    let config = match read_jsonc(&key) {
        Ok(config) => config,
        Err(e) => {
            warn!("{:#}", e);
            return Tsconfig::default();
        }
    };
    let dir = key.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut merged = Tsconfig::default();
    if let Some(extends) = &config.extends {
        for base in extends.paths() {
            if !base.starts_with('.') && !Path::new(base).is_absolute() {
                warn!("Skipping package tsconfig base \"{}\" in {}", base, key.display());
                continue;
            }
            let mut base_path = dir.join(base);
            if base_path.extension().is_none() {
                base_path.set_extension("json");
            }
            merged = merge(merged, load_merged(&base_path, visited));
        }
    }
    merged = merge(merged, config.clone());

    if let Some(refs) = &config.references {
        for reference in refs {
            let ref_path = reference_config(&dir, reference);
            merged = merge(merged, load_merged(&ref_path, visited));
        }
    }
    merged
}

fn reference_config(dir: &Path, reference: &ProjectReference) -> PathBuf {
    let target = dir.join(&reference.path);
    if reference.path.ends_with(".json") { target } else { target.join("tsconfig.json") }
}

fn read_jsonc(path: &Path) -> Result<Tsconfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&strip_jsonc(&text))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Fold `over` onto `base`. Scalars in `over` win, `compilerOptions` merge per
/// key, and list fields concatenate without duplicates.
fn merge(base: Tsconfig, over: Tsconfig) -> Tsconfig {
    let compiler_options = match (base.compiler_options, over.compiler_options) {
        (Some(mut b), Some(o)) => {
            b.extend(o);
            Some(b)
        }
        (b, o) => o.or(b),
    };
    let references = match (base.references, over.references) {
        (Some(mut b), Some(o)) => {
            for r in o {
                if !b.contains(&r) {
                    b.push(r);
                }
            }
            Some(b)
        }
        (b, o) => o.or(b),
    };
    Tsconfig {
        extends: over.extends.or(base.extends),
        compiler_options,
        include: concat_unique(base.include, over.include),
        exclude: concat_unique(base.exclude, over.exclude),
        files: concat_unique(base.files, over.files),
        references,
    }
}

fn concat_unique(base: Option<Vec<String>>, over: Option<Vec<String>>) -> Option<Vec<String>> {
    match (base, over) {
        (Some(mut b), Some(o)) => {
            for item in o {
                if !b.contains(&item) {
                    b.push(item);
                }
            }
            Some(b)
        }
        (b, o) => o.or(b),
    }
}

/// Remove `//` and `/* */` comments and trailing commas, leaving string
/// literals untouched.
pub fn strip_jsonc(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}
