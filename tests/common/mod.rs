#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vread::tree::{collect_paths, IgnoreMatcher};

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Write `content` to `rel` under `root`, creating parent folders.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let full = root.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full, content).unwrap();
    full
}

/// Collect under `root` with `patterns` and return root-relative strings.
/// The root itself shows up as "".
pub fn collect_relative(root: &Path, patterns: &[&str]) -> Vec<String> {
    let matcher = IgnoreMatcher::new(root, patterns);
    collect_paths(root, &matcher)
        .unwrap()
        .iter()
        .map(|p| relative(root, p))
        .collect()
}

pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

/// Absolute paths for `rel` entries under `root`.
pub fn absolute(root: &Path, rel: &[&str]) -> Vec<PathBuf> {
    rel.iter().map(|r| root.join(r)).collect()
}
