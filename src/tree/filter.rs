//! Ignore-pattern matching against root-relative paths and their segments.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};

use super::relative_to;

/// Which part of a path an ignore pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The whole root-relative path matched.
    Path,
    /// A single segment matched. Every descendant carries the same segment,
    /// so the exclusion extends to the whole subtree.
    Segment,
}

/// One compiled ignore pattern.
#[derive(Debug, Clone)]
struct IgnoreRule {
    glob: GlobMatcher,
    /// Trailing `/`: only directory segments match.
    dir_only: bool,
    /// Leading `/`: only the whole relative path is tested.
    anchored: bool,
}

impl IgnoreRule {
    fn parse(pattern: &str) -> Option<Self> {
        let (body, dir_only) = match pattern.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (pattern, false),
        };
        let (body, anchored) = match body.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (body, false),
        };
        if body.is_empty() {
            return None;
        }

        let glob = GlobBuilder::new(&literal_braces(body))
            .literal_separator(true)
            .build()
            .ok()?
            .compile_matcher();

        Some(Self {
            glob,
            dir_only,
            anchored,
        })
    }
}

/// Rewrite `{` and `}` outside character classes as one-character classes,
/// so braces match themselves instead of starting an alternation.
fn literal_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    // Members seen in the open class; `None` outside a class.
    let mut class: Option<usize> = None;

    while let Some(c) = chars.next() {
        match class {
            None => match c {
                '{' => out.push_str("[{]"),
                '}' => out.push_str("[}]"),
                '[' => {
                    out.push(c);
                    class = Some(0);
                }
                '\\' => {
                    out.push(c);
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                _ => out.push(c),
            },
            Some(members) => {
                out.push(c);
                class = match c {
                    ']' if members > 0 => None,
                    '!' | '^' if members == 0 => Some(0),
                    _ => Some(members + 1),
                };
            }
        }
    }
    out
}

/// Decides whether collected paths are excluded by a set of glob patterns.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    root: PathBuf,
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    /// Compile `patterns` for paths under `root`. Malformed patterns are skipped.
    pub fn new<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Self {
        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match IgnoreRule::parse(pattern) {
                Some(rule) => rules.push(rule),
                None => tracing::debug!(pattern, "skipping malformed ignore pattern"),
            }
        }

        Self {
            root: root.to_path_buf(),
            rules,
        }
    }

    /// Number of patterns that compiled.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `path` is excluded by any pattern.
    pub fn should_exclude(&self, path: &Path) -> bool {
        self.classify(path, None).is_some()
    }

    /// Report how `path` is excluded, or `None` when it survives.
    ///
    /// `is_dir` is only consulted for directory-only patterns that hit the
    /// final segment; when it is `None` the path is stat'ed on demand.
    pub fn classify(&self, path: &Path, is_dir: Option<bool>) -> Option<MatchKind> {
        if self.rules.is_empty() {
            return None;
        }
        let relative = relative_to(path, &self.root)?;
        let relative = if relative.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            relative
        };

        let mut leaf_is_dir = is_dir;
        let mut leaf_dir = || {
            *leaf_is_dir.get_or_insert_with(|| {
                std::fs::metadata(path)
                    .map(|m| m.is_dir())
                    .unwrap_or(false)
            })
        };

        let segments: Vec<&Path> = relative
            .components()
            .map(|c| Path::new(c.as_os_str()))
            .collect();
        let last = segments.len().saturating_sub(1);

        for rule in self.rules.iter().filter(|r| !r.anchored) {
            for (i, segment) in segments.iter().enumerate() {
                if !rule.glob.is_match(segment) {
                    continue;
                }
                if !rule.dir_only || i < last || leaf_dir() {
                    return Some(MatchKind::Segment);
                }
            }
        }

        for rule in &self.rules {
            if rule.glob.is_match(&relative) && (!rule.dir_only || leaf_dir()) {
                return Some(MatchKind::Path);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> IgnoreMatcher {
        IgnoreMatcher::new(Path::new("."), patterns)
    }

    #[test]
    fn empty_pattern_list_excludes_nothing() {
        let m = matcher(&[]);
        assert!(m.is_empty());
        assert!(!m.should_exclude(Path::new("./anything/at/all.txt")));
    }

    #[test]
    fn extension_glob_matches_any_depth() {
        let m = matcher(&["*.log"]);
        assert!(m.should_exclude(Path::new("./app.log")));
        assert!(m.should_exclude(Path::new("./sub/app.log")));
        assert!(!m.should_exclude(Path::new("./app.log.bak")));
    }

    #[test]
    fn name_matches_ancestor_segment() {
        let m = matcher(&["node_modules"]);
        assert_eq!(
            m.classify(Path::new("./node_modules/pkg/index.js"), Some(false)),
            Some(MatchKind::Segment)
        );
        assert!(!m.should_exclude(Path::new("./src/node_modules.rs")));
    }

    #[test]
    fn whole_path_pattern_reports_path_kind() {
        let m = matcher(&["docs/_build"]);
        assert_eq!(
            m.classify(Path::new("./docs/_build"), Some(true)),
            Some(MatchKind::Path)
        );
        assert_eq!(m.classify(Path::new("./docs/_build/index.html"), Some(false)), None);
    }

    #[test]
    fn star_does_not_cross_separators() {
        let m = matcher(&["src*"]);
        assert!(m.should_exclude(Path::new("./src")));
        assert!(m.should_exclude(Path::new("./srcs/lib.rs")));
        assert!(!m.should_exclude(Path::new("./lib/source.rs")));
    }

    #[test]
    fn character_classes_and_single_wildcards() {
        let m = matcher(&["*.py[cod]", "?.tmp"]);
        assert!(m.should_exclude(Path::new("./pkg/mod.pyc")));
        assert!(m.should_exclude(Path::new("./pkg/mod.pyo")));
        assert!(!m.should_exclude(Path::new("./pkg/mod.py")));
        assert!(m.should_exclude(Path::new("./a.tmp")));
        assert!(!m.should_exclude(Path::new("./ab.tmp")));
    }

    #[test]
    fn malformed_pattern_is_skipped() {
        let m = matcher(&["[", "*.log"]);
        assert_eq!(m.len(), 1);
        assert!(!m.should_exclude(Path::new("./[")));
        assert!(m.should_exclude(Path::new("./x.log")));
    }

    #[test]
    fn braces_are_literal() {
        let m = matcher(&["{draft", "{a,b}.txt"]);
        assert_eq!(m.len(), 2);
        assert!(m.should_exclude(Path::new("./{draft")));
        assert!(m.should_exclude(Path::new("./{a,b}.txt")));
        assert!(!m.should_exclude(Path::new("./a.txt")));
    }

    #[test]
    fn brace_escaping_leaves_classes_alone() {
        assert_eq!(literal_braces("x{y}"), "x[{]y[}]");
        assert_eq!(literal_braces("[{]z"), "[{]z");
        assert_eq!(literal_braces("[]{]}"), "[]{][}]");
        assert_eq!(literal_braces("[!{]{"), "[!{][{]");
    }

    #[test]
    fn directory_only_pattern_needs_a_directory_leaf() {
        let m = matcher(&["build/"]);
        assert_eq!(m.classify(Path::new("./build"), Some(true)), Some(MatchKind::Segment));
        assert_eq!(m.classify(Path::new("./build"), Some(false)), None);
        assert_eq!(
            m.classify(Path::new("./build/out.o"), Some(false)),
            Some(MatchKind::Segment)
        );
    }

    #[test]
    fn anchored_pattern_only_matches_from_root() {
        let m = matcher(&["/site"]);
        assert_eq!(m.classify(Path::new("./site"), Some(true)), Some(MatchKind::Path));
        assert_eq!(m.classify(Path::new("./docs/site"), Some(true)), None);
    }

    #[test]
    fn path_outside_root_fails_open() {
        let m = IgnoreMatcher::new(Path::new("/srv/project"), &["*"]);
        assert!(!m.should_exclude(Path::new("/etc/passwd")));
        assert!(m.should_exclude(Path::new("/srv/project/anything")));
    }

    #[test]
    fn root_matches_as_dot() {
        let m = matcher(&["."]);
        assert!(m.should_exclude(Path::new(".")));
        assert!(!m.should_exclude(Path::new("./a")));
    }
}
