#![forbid(unsafe_code)]
//! Writes release assets for vread: shell completions, a man page, and the
//! default ignore file, all under `dist/` (or the directory given as argument).

use anyhow::Context;
use clap::CommandFactory;
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use std::fs;
use std::path::{Path, PathBuf};
use vread::cli::Args;
use vread::config::{DEFAULT_IGNORE_FILE, IGNORE_FILE_NAME};

const BIN_NAME: &str = "vread";

fn write_completions(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
        let mut cmd = Args::command();
        generate_to(shell, &mut cmd, BIN_NAME, dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
    }
    Ok(())
}

fn write_man_page(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let mut buffer = Vec::new();
    Man::new(Args::command()).render(&mut buffer)?;
    fs::write(dir.join(format!("{BIN_NAME}.1")), buffer)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));

    write_completions(&out_dir.join("completions"))?;
    write_man_page(&out_dir.join("man"))?;
    fs::write(out_dir.join(IGNORE_FILE_NAME), DEFAULT_IGNORE_FILE)?;

    eprintln!(
        "generated completions, man page and {} under {}",
        IGNORE_FILE_NAME,
        out_dir.display()
    );
    Ok(())
}
