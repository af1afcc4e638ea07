//! Assembles the output artifact from a collected path list.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dump::{dump_all, DumpReport};
use crate::tree::write_tree;

/// Which sections to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotMode {
    /// Tree followed by one section per entry.
    #[default]
    Full,
    /// Tree only.
    StructureOnly,
}

impl SnapshotMode {
    pub fn from_structure_flag(structure_only: bool) -> Self {
        if structure_only {
            SnapshotMode::StructureOnly
        } else {
            SnapshotMode::Full
        }
    }
}

/// Write the tree section and, in full mode, every entry section to `sink`.
pub fn write_snapshot<W: Write>(
    sink: &mut W,
    root: &Path,
    paths: &[PathBuf],
    mode: SnapshotMode,
) -> io::Result<DumpReport> {
    write_tree(sink, paths, root)?;
    let report = match mode {
        SnapshotMode::Full => dump_all(sink, paths, root)?,
        SnapshotMode::StructureOnly => DumpReport::default(),
    };
    sink.flush()?;
    Ok(report)
}

/// Create (truncating) the output file, creating its folder first.
pub fn create_output_file(path: &Path) -> io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}
