//! Run settings, the ignore file, and the default pattern table.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::Args;

/// Folder that receives the ignore file and the snapshot.
pub const OUTPUT_DIR: &str = "readerout";
pub const IGNORE_FILE_NAME: &str = ".readerignore";
pub const OUTPUT_FILE_NAME: &str = "files_structure.txt";

/// Contents written to a missing ignore file.
pub const DEFAULT_IGNORE_FILE: &str = include_str!("../assets/default.readerignore");

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory to snapshot.
    pub root: PathBuf,
    /// Folder holding the ignore file and the output artifact.
    pub output_dir: PathBuf,
    /// Emit only the tree section.
    pub structure_only: bool,
    /// Extra pattern appended to the ignore file's patterns.
    pub extra_pattern: Option<String>,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            root: args.path.clone(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            structure_only: args.structure,
            extra_pattern: args.include.clone().filter(|p| !p.is_empty()),
        }
    }

    pub fn ignore_file(&self) -> PathBuf {
        self.output_dir.join(IGNORE_FILE_NAME)
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }

    /// Patterns from the ignore file plus the extra pattern, in that order.
    pub fn load_patterns(&self) -> io::Result<Vec<String>> {
        let mut patterns = read_ignore_patterns(&self.ignore_file())?;
        if let Some(extra) = &self.extra_pattern {
            patterns.push(extra.clone());
        }
        Ok(patterns)
    }
}

/// Patterns from the bundled default table.
pub fn default_patterns() -> Vec<String> {
    parse_ignore_patterns(DEFAULT_IGNORE_FILE)
}

/// Create the ignore file with the default table if it does not exist.
///
/// Returns `true` when the file was written.
pub fn ensure_ignore_file(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_IGNORE_FILE)?;
    tracing::info!(path = %path.display(), "created default ignore file");
    Ok(true)
}

pub fn read_ignore_patterns(path: &Path) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        tracing::warn!(path = %path.display(), "ignore file is not valid UTF-8; invalid bytes replaced");
    }
    let patterns = parse_ignore_patterns(&text);
    tracing::debug!(path = %path.display(), count = patterns.len(), "loaded ignore patterns");
    Ok(patterns)
}

/// One pattern per line; blank lines and `#` comments are dropped.
pub fn parse_ignore_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
