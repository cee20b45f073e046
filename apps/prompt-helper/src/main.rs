use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{debug, info};
use prompt_helper_digest::Config;
use std::{
    fs::File,
    io::{BufWriter, Write},
    time::Instant,
};

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let mut cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);
    cfg.initialize()?;

    let start = Instant::now();
    let num_threads = rayon::current_num_threads();
    info!("Collecting project digest (using {} threads)", num_threads);

    let report = prompt_helper_digest::collect_project_report(&cfg)?;

    let md_path = cfg.markdown_path()?;
    let file = File::create(&md_path)
        .with_context(|| format!("Failed to create {}", md_path.display()))?;
    let mut out = BufWriter::new(file);
    prompt_helper_digest::write_markdown(&mut out, &report)
        .with_context(|| format!("Failed to write {}", md_path.display()))?;
    info!("Markdown written to {}", md_path.display());

    let json_path = if cfg.json {
        let path = cfg.json_path()?;
        prompt_helper_digest::write_json_manifest(&path, &report)?;
        Some(path)
    } else {
        None
    };

    let elapsed_ms = start.elapsed().as_millis();
    prompt_helper_digest::print_summary(&mut stdout, &report, &md_path, json_path.as_deref())?;
    writeln!(
        stdout,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        report.file_count().to_string().cyan(),
        num_threads.to_string().cyan()
    )?;
    stdout.flush()?;

    Ok(())
}
