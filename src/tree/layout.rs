//! Flat sorted path list to ASCII tree, without building a tree.
//!
//! Nesting is inferred from sorted-order adjacency: each entry is compared
//! with the next one by segment count, and ancestors that never appeared in
//! the list are opened on the fly.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{PathEntry, BRANCH, LAST_BRANCH, PIPE};

pub const TREE_HEADER: &str = "Directory Structure:";
pub const ROOT_MARKER: &str = ".";
pub const FOLDER_MARKER: &str = " [Folder]";

/// Transient state carried from one rendered entry to the next.
#[derive(Debug, Default)]
pub struct RenderState {
    /// Segments of the most recently emitted path.
    open: Vec<String>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit folder lines for ancestors of `entry` that are not yet open.
    fn open_ancestors(&mut self, entry: &PathEntry, lines: &mut Vec<String>) {
        let ancestors = &entry.segments()[..entry.depth().saturating_sub(1)];
        let shared = self
            .open
            .iter()
            .zip(ancestors)
            .take_while(|(open, wanted)| open == wanted)
            .count();

        for (level, name) in ancestors.iter().enumerate().skip(shared) {
            // A synthesized ancestor always has the current entry below it.
            lines.push(format!("{}{BRANCH}{name}{FOLDER_MARKER}", indent(level)));
        }
    }

    fn close(&mut self, entry: &PathEntry) {
        self.open.clear();
        self.open.extend_from_slice(entry.segments());
    }
}

fn indent(level: usize) -> String {
    PIPE.repeat(level)
}

/// Produce the tree section, header lines included, one string per line.
pub fn tree_lines(paths: &[PathBuf], root: &Path) -> Vec<String> {
    let entries: Vec<PathEntry> = paths
        .iter()
        .map(|p| PathEntry::new(p, root))
        .filter(|e| !e.is_root())
        .collect();

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(TREE_HEADER.to_string());
    lines.push(ROOT_MARKER.to_string());

    let mut state = RenderState::new();
    for (i, entry) in entries.iter().enumerate() {
        let depth = entry.depth();
        let next_depth = entries.get(i + 1).map(PathEntry::depth);

        state.open_ancestors(entry, &mut lines);

        // Last at its level unless the next entry goes deeper.
        let is_last = next_depth.map_or(true, |next| next <= depth);
        let prefix = indent(depth - 1);
        let glyph = if is_last { LAST_BRANCH } else { BRANCH };
        let marker = if entry.is_dir() { FOLDER_MARKER } else { "" };
        lines.push(format!("{prefix}{glyph}{}{marker}", entry.name()));

        if is_last && next_depth.is_some_and(|next| next < depth) {
            lines.push(prefix);
        }

        state.close(entry);
    }

    lines
}

/// Render the tree section as a single newline-terminated string.
pub fn render_tree(paths: &[PathBuf], root: &Path) -> String {
    let mut out = String::new();
    for line in tree_lines(paths, root) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Write the tree section to `sink`.
pub fn write_tree<W: Write>(sink: &mut W, paths: &[PathBuf], root: &Path) -> io::Result<()> {
    for line in tree_lines(paths, root) {
        writeln!(sink, "{line}")?;
    }
    Ok(())
}
