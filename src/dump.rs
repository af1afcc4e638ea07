//! Per-entry sections: size, location breadcrumb, and raw file content.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::tree::{PathEntry, BRANCH, LAST_BRANCH, PIPE};

/// Width of the dashed separator line.
pub const SEPARATOR_WIDTH: usize = 55;

const LEAF_MARKER: &str = " (<-)";

#[derive(Debug, Error)]
pub enum DumpError {
    /// The entry could not be stat'ed. Only this entry is affected.
    #[error("error getting info for {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing to the output sink failed.
    #[error("failed to write snapshot: {0}")]
    Write(#[from] io::Error),
}

/// What a single dumped section contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    /// Regular file whose content was copied.
    File,
    /// File whose content could not be read; header only.
    Unreadable,
}

/// An entry that produced no section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a full dump pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DumpReport {
    /// Sections written, headers only included.
    pub written: usize,
    /// Files whose content section was omitted because the read failed.
    pub unreadable: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl DumpReport {
    pub fn is_clean(&self) -> bool {
        self.unreadable == 0 && self.skipped.is_empty()
    }
}

/// `"<N>B"` below 1 KiB, otherwise whole kibibytes as `"<N>KB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes}B")
    } else {
        format!("{}KB", bytes / 1024)
    }
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Ancestor-to-leaf rendering of a relative path, one line per segment.
pub fn breadcrumb(segments: &[String]) -> Vec<String> {
    if segments.is_empty() {
        return vec![format!("{LAST_BRANCH}.{LEAF_MARKER}")];
    }
    let last = segments.len() - 1;
    segments
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let indent = PIPE.repeat(i);
            if i == last {
                format!("{indent}{LAST_BRANCH}{name}{LEAF_MARKER}")
            } else {
                format!("{indent}{BRANCH}{name}")
            }
        })
        .collect()
}

/// Write the section for one path.
pub fn dump_one<W: Write>(sink: &mut W, path: &Path, root: &Path) -> Result<EntryKind, DumpError> {
    let metadata = fs::metadata(path).map_err(|source| DumpError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let entry = PathEntry::new(path, root);
    let relative = entry.relative_display();
    let separator = separator();

    writeln!(sink, "{separator}")?;
    writeln!(sink, "// The size of ({relative}): {}", format_size(metadata.len()))?;
    writeln!(sink, "{separator}")?;
    writeln!(sink, "// The file location of ({relative}):")?;
    for line in breadcrumb(entry.segments()) {
        writeln!(sink, "{line}")?;
    }
    writeln!(sink, "{separator}")?;

    if metadata.is_dir() {
        return Ok(EntryKind::Directory);
    }

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read file content");
            return Ok(EntryKind::Unreadable);
        }
    };

    writeln!(sink)?;
    writeln!(sink, "// The content of ({relative}):")?;
    sink.write_all(&content)?;
    writeln!(sink)?;
    writeln!(sink, "{separator}")?;
    Ok(EntryKind::File)
}

/// Write one section per path. Stat failures are logged and skipped; sink
/// failures abort.
pub fn dump_all<W: Write>(sink: &mut W, paths: &[PathBuf], root: &Path) -> io::Result<DumpReport> {
    let mut report = DumpReport::default();

    for path in paths {
        match dump_one(sink, path, root) {
            Ok(kind) => {
                report.written += 1;
                if kind == EntryKind::Unreadable {
                    report.unreadable += 1;
                }
            }
            Err(DumpError::Write(err)) => return Err(err),
            Err(err @ DumpError::Stat { .. }) => {
                tracing::warn!("{err}");
                report.skipped.push(SkippedEntry {
                    path: path.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        written = report.written,
        skipped = report.skipped.len(),
        unreadable = report.unreadable,
        "dumped entries"
    );
    Ok(report)
}
