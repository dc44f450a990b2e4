// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-path reconciliation shared by the parsers.
//!
//! Submitted reports mix machine-local absolute paths (under a build or
//! source root) with project-relative ones. These helpers collapse the
//! machine-local noise without ever producing a path that escapes the
//! project via parent traversal.

/// Placeholder prefix for paths that live under the build directory.
/// The real build directory is machine-specific and meaningless to
/// report consumers.
pub const BUILD_PLACEHOLDER: &str = "<build>";

/// Lexically clean a slash-separated path: collapse repeated slashes
/// and `.` segments and resolve `..` where possible.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for comp in path.split('/') {
        match comp {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|c| *c != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            c => parts.push(c),
        }
    }
    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Relative remainder of `path` under the directory `root`, or `None`
/// if `path` does not lie under it. A remainder that would require
/// parent traversal is rejected.
pub fn strip_root(path: &str, root: &str) -> Option<String> {
    if root.is_empty() {
        return None;
    }
    let path = clean(path);
    let root = clean(root);
    let rel = if root == "/" {
        path.strip_prefix('/')?
    } else {
        path.strip_prefix(&root)?.strip_prefix('/')?
    };
    if rel == ".." || rel.starts_with("../") {
        return None;
    }
    Some(rel.to_string())
}

/// Rewrite a diagnostic or coverage path against the known roots:
/// under the build directory it gains the [`BUILD_PLACEHOLDER`] prefix,
/// under the source root it becomes project-relative, and anywhere else
/// it is left unchanged.
pub fn rewrite(path: &str, build_dir: &str, source_dir: &str) -> String {
    if let Some(rel) = strip_root(path, build_dir) {
        return format!("{}/{}", BUILD_PLACEHOLDER, rel);
    }
    if let Some(rel) = strip_root(path, source_dir) {
        return rel;
    }
    path.to_string()
}

#[cfg(test)]
#[path = "pathmap_tests.rs"]
mod tests;
