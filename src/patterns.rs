//! Ignore-pattern normalization and matching for directory traversal.

use std::path::{Component, Path};

/// Normalize path separators in a pattern for cross-platform support.
///
/// On Windows, both forward slash and backslash are valid path separators,
/// so backslashes are rewritten to forward slashes. On Unix a backslash can
/// be part of a filename and is left intact.
pub fn normalize(pattern: &str) -> String {
    if cfg!(windows) {
        pattern.replace('\\', "/")
    } else {
        pattern.to_string()
    }
}

/// Check if a path should be ignored based on ignore patterns.
///
/// Patterns can be:
/// - Simple names like `bar`: matches any directory with that name
/// - Paths like `foo/bar`: matches a `bar` directory inside a `foo`
///   directory at any depth, which also excludes everything inside it
///   because the caller skips descent on a match.
pub fn should_ignore(path: &Path, ignore_patterns: &[String]) -> bool {
    if ignore_patterns.is_empty() {
        return false;
    }

    let path_parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    for pattern in ignore_patterns {
        let normalized = normalize(pattern);
        let pattern_parts: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

        match pattern_parts.as_slice() {
            [] => {}
            [name] => {
                if path_parts.last().is_some_and(|last| last == name) {
                    return true;
                }
            }
            _ => {
                if path_parts.len() < pattern_parts.len() {
                    continue;
                }
                if path_parts.windows(pattern_parts.len()).any(|window| {
                    window
                        .iter()
                        .map(String::as_str)
                        .eq(pattern_parts.iter().copied())
                }) {
                    return true;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_pattern_list_never_ignores() {
        assert!(!should_ignore(Path::new("foo/bar"), &[]));
        assert!(!should_ignore(Path::new("/"), &[]));
    }

    #[test]
    fn simple_name_matches_at_any_depth() {
        let pats = patterns(&["node_modules"]);
        assert!(should_ignore(Path::new("node_modules"), &pats));
        assert!(should_ignore(Path::new("a/b/node_modules"), &pats));
        assert!(!should_ignore(Path::new("a/node_modules/b"), &pats));
        assert!(!should_ignore(Path::new("a/node_modules_x"), &pats));
    }

    #[test]
    fn multi_segment_pattern_matches_contiguous_window() {
        let pats = patterns(&["foo/bar"]);
        assert!(should_ignore(Path::new("foo/bar"), &pats));
        assert!(should_ignore(Path::new("anything/foo/bar"), &pats));
        assert!(should_ignore(Path::new("x/foo/bar/y"), &pats));
        assert!(!should_ignore(Path::new("foo/baz/bar"), &pats));
    }

    #[test]
    fn pattern_longer_than_path_never_matches() {
        let pats = patterns(&["a/b/c"]);
        assert!(!should_ignore(Path::new("b/c"), &pats));
        assert!(!should_ignore(Path::new("c"), &pats));
    }

    #[test]
    fn multiple_patterns_are_ored() {
        let pats = patterns(&["venv", ".git"]);
        assert!(should_ignore(Path::new("project/venv"), &pats));
        assert!(should_ignore(Path::new("project/.git"), &pats));
        assert!(!should_ignore(Path::new("project/src"), &pats));
    }

    #[cfg(not(windows))]
    #[test]
    fn backslash_is_literal_on_unix() {
        assert_eq!(normalize("foo\\bar"), "foo\\bar");
        // A backslash name is a single segment here, not a path.
        let pats = patterns(&["foo\\bar"]);
        assert!(should_ignore(Path::new("x/foo\\bar"), &pats));
        assert!(!should_ignore(Path::new("foo/bar"), &pats));
    }
}
