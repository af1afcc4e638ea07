#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing_subscriber::EnvFilter;
use vread::cli::Args;
use vread::config::{self, Settings};
use vread::snapshot::{create_output_file, write_snapshot, SnapshotMode};
use vread::tree::{collect_paths, IgnoreMatcher};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("vread: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_logging(&args);

    let settings = Settings::from_args(&args);
    let root = &settings.root;

    let metadata =
        fs::metadata(root).with_context(|| format!("{}: failed to resolve path", root.display()))?;
    anyhow::ensure!(metadata.is_dir(), "{}: Not a directory", root.display());

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "error creating output folder {}",
            settings.output_dir.display()
        )
    })?;

    let ignore_file = settings.ignore_file();
    config::ensure_ignore_file(&ignore_file)
        .with_context(|| format!("error ensuring ignore file {}", ignore_file.display()))?;
    let patterns = settings
        .load_patterns()
        .with_context(|| format!("error reading {}", ignore_file.display()))?;

    let matcher = IgnoreMatcher::new(root, &patterns);
    tracing::debug!(
        patterns = patterns.len(),
        compiled = matcher.len(),
        "ignore matcher ready"
    );

    let paths = collect_paths(root, &matcher).context("error processing paths")?;

    let output_path = settings.output_file();
    let mut output = create_output_file(&output_path)
        .with_context(|| format!("error creating output file {}", output_path.display()))?;

    let mode = SnapshotMode::from_structure_flag(settings.structure_only);
    let report = write_snapshot(&mut output, root, &paths, mode)
        .with_context(|| format!("error writing {}", output_path.display()))?;

    tracing::info!(
        output = %output_path.display(),
        entries = paths.len(),
        skipped = report.skipped.len(),
        "snapshot written"
    );
    Ok(())
}
