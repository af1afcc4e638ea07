//! Path collection, ignore filtering, and tree layout.

pub mod filter;
pub mod layout;
pub mod walk;

use std::cell::OnceCell;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

pub use filter::{IgnoreMatcher, MatchKind};
pub use layout::{render_tree, tree_lines, write_tree};
pub use walk::{collect, collect_paths, CollectError};

pub(crate) const BRANCH: &str = "\u{251c}\u{2500}\u{2500} "; // ├──
pub(crate) const LAST_BRANCH: &str = "\u{2514}\u{2500}\u{2500} "; // └──
pub(crate) const PIPE: &str = "\u{2502}   "; // │

/// A collected path together with its root-relative segments.
#[derive(Debug, Clone)]
pub struct PathEntry {
    /// Path as produced by the walk.
    path: PathBuf,
    /// Root-relative components, outermost first. Empty for the root itself.
    segments: Vec<String>,
    /// Resolved on first query with a stat call.
    is_dir: OnceCell<bool>,
}

impl PathEntry {
    pub fn new(path: &Path, root: &Path) -> Self {
        let relative = relative_to(path, root).unwrap_or_else(|| path.to_path_buf());
        let segments = relative
            .components()
            .filter_map(|c| match c {
                Component::CurDir => None,
                other => Some(other.as_os_str().to_string_lossy().into_owned()),
            })
            .collect();

        Self {
            path: path.to_path_buf(),
            segments,
            is_dir: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; direct children of the root have depth 1.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Final segment, or `.` for the root.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or(".")
    }

    /// Relative path joined with the platform separator, `.` for the root.
    pub fn relative_display(&self) -> String {
        if self.is_root() {
            ".".to_string()
        } else {
            self.segments.join(MAIN_SEPARATOR_STR)
        }
    }

    /// Whether the path is a directory, following symlinks. Stat failures read as `false`.
    pub fn is_dir(&self) -> bool {
        *self.is_dir.get_or_init(|| {
            std::fs::metadata(&self.path)
                .map(|m| m.is_dir())
                .unwrap_or(false)
        })
    }
}

/// Express `path` relative to `root`, ignoring leading `.` components on both sides.
///
/// Returns `None` when `path` does not live under `root`.
pub fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    let path = strip_cur_dir(path);
    let root = strip_cur_dir(root);
    path.strip_prefix(&root).ok().map(Path::to_path_buf)
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
