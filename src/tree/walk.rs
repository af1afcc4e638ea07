use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::filter::{IgnoreMatcher, MatchKind};

/// Failure while walking the directory tree. Aborts collection.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("error accessing path {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Walk `root` once and return every entry the matcher does not exclude.
///
/// The root itself is part of the walk. Results are sorted byte-wise by
/// their full path string and contain no duplicates.
pub fn collect_paths(root: &Path, matcher: &IgnoreMatcher) -> Result<Vec<PathBuf>, CollectError> {
    let mut paths = Vec::new();
    let mut pruned = 0usize;

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry_result) = walker.next() {
        let entry = entry_result.map_err(|source| CollectError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        let is_dir = entry.file_type().is_dir();
        // Links are never descended, but directory-only patterns still see
        // what they point at.
        let dir_hint = if entry.path_is_symlink() {
            None
        } else {
            Some(is_dir)
        };
        match matcher.classify(entry.path(), dir_hint) {
            None => paths.push(entry.into_path()),
            // Every descendant carries the matched segment, so skipping the
            // subtree yields the same result as testing each child.
            Some(MatchKind::Segment) if is_dir && entry.depth() > 0 => {
                tracing::trace!(path = %entry.path().display(), "pruning excluded directory");
                pruned += 1;
                walker.skip_current_dir();
            }
            Some(_) => {
                tracing::trace!(path = %entry.path().display(), "excluded");
            }
        }
    }

    sort_paths(&mut paths);
    tracing::debug!(
        root = %root.display(),
        collected = paths.len(),
        pruned,
        "collected paths"
    );
    Ok(paths)
}

/// Build a matcher for `patterns` and collect under `root`.
pub fn collect<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<PathBuf>, CollectError> {
    collect_paths(root, &IgnoreMatcher::new(root, patterns))
}

/// Sort byte-wise by the full path string and drop duplicates.
pub fn sort_paths(paths: &mut Vec<PathBuf>) {
    paths.sort_by(|a, b| a.as_os_str().as_encoded_bytes().cmp(b.as_os_str().as_encoded_bytes()));
    paths.dedup();
}
