use anyhow::{Result, anyhow};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "prompt-helper", version)]
#[command(about = "Generate a promptHelper markdown summary of your project")]
pub struct Config {
    /// Base directory to scan
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Output markdown filename, relative to the base directory
    #[arg(short, long, default_value = "promptHelper.md")]
    pub out: PathBuf,

    /// Path to a style markdown file (defaults to promptHelper/style.md)
    #[arg(short, long)]
    pub style: Option<PathBuf>,

    /// Path to a code file or directory to include (repeatable)
    #[arg(short, long)]
    pub code: Vec<String>,

    /// Glob pattern of files to leave out of the code section (repeatable)
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Scan for TODO and FIXME comments
    #[arg(long)]
    pub todos: bool,

    /// Append a complexity & metrics report
    #[arg(long)]
    pub complexity: bool,

    /// Include a JSON dependency graph and the unused files list
    #[arg(long)]
    pub dependency_graph: bool,

    /// Also emit a `.json` manifest alongside the markdown
    #[arg(long)]
    pub json: bool,

    /// Extra entry point never reported as unused (repeatable)
    #[arg(long = "entry")]
    pub entries: Vec<String>,

    /// Report missing path headers without writing them into files
    #[arg(long)]
    pub no_stamp_headers: bool,

    #[clap(skip)]
    root: Option<PathBuf>,
}

impl Config {
    /// Resolve the base directory and check that it is a directory
    pub fn initialize(&mut self) -> Result<()> {
        debug!("Resolving base directory: {:?}", self.dir);
        let root = self
            .dir
            .canonicalize()
            .map_err(|_| anyhow!("\"{}\" is not a valid directory.", self.dir.display()))?;
        if !root.is_dir() {
            return Err(anyhow!("\"{}\" is not a valid directory.", root.display()));
        }
        info!("Using root directory: {}", root.display());
        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    pub fn markdown_path(&self) -> Result<PathBuf> {
        Ok(self.root()?.join(&self.out))
    }

    /// The markdown path with `.md` swapped for `.json`, or `.json` appended
    /// when the output has another extension.
    pub fn json_path(&self) -> Result<PathBuf> {
        let md = self.markdown_path()?;
        if md.extension().is_some_and(|ext| ext == "md") {
            Ok(md.with_extension("json"))
        } else {
            let mut s = md.into_os_string();
            s.push(".json");
            Ok(PathBuf::from(s))
        }
    }
}
