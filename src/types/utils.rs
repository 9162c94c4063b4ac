//! Shared utility functions.
//!
//! ## Path Helpers
//!
//! All paths handled by this crate are relative POSIX paths. The repository root is the
//! synthetic directory `"."`.
//!
//! - `parent_dir` - directory of a file path (`"."` for root-level files)
//! - `ancestor_dirs` - every ancestor directory including `"."`
//! - `is_strict_descendant` - ancestor/descendant test on path segments
//! - `path_depth` - number of path segments

use std::fmt::Display;

/// Synthetic name of the repository root directory
pub const ROOT_DIR: &str = ".";

// =============================================================================
// Path Utilities
// =============================================================================

/// Directory part of a relative file path, `"."` when the file sits at the root.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx > 0 => &path[..idx],
        _ => ROOT_DIR,
    }
}

/// Path segments with empty and `.` segments dropped
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ROOT_DIR)
}

/// Every ancestor directory of `dir`, outermost first, starting with `"."`. A `./`
/// prefix does not create a directory of its own.
///
/// ```
/// use changelens::types::ancestor_dirs;
///
/// assert_eq!(ancestor_dirs("src/app/ui"), vec![".", "src", "src/app", "src/app/ui"]);
/// assert_eq!(ancestor_dirs("."), vec!["."]);
/// ```
pub fn ancestor_dirs(dir: &str) -> Vec<String> {
    let mut dirs = vec![ROOT_DIR.to_string()];
    if dir == ROOT_DIR || dir.is_empty() {
        return dirs;
    }
    let mut current = String::new();
    for segment in segments(dir) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        dirs.push(current.clone());
    }
    dirs
}

/// True when `path` lies strictly below `ancestor`. The root `"."` is an ancestor of
/// every other path.
pub fn is_strict_descendant(path: &str, ancestor: &str) -> bool {
    if path == ancestor {
        return false;
    }
    if ancestor == ROOT_DIR {
        return path != ROOT_DIR;
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

/// True when `path` equals `dir` or lies below it.
pub fn is_within(path: &str, dir: &str) -> bool {
    path == dir || is_strict_descendant(path, dir)
}

/// Number of path segments; the root has depth 0.
pub fn path_depth(dir: &str) -> usize {
    if dir == ROOT_DIR || dir.is_empty() {
        0
    } else {
        segments(dir).count()
    }
}

/// Final path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name without its last extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Lowercase extension without the dot, empty when there is none.
pub fn extension_of(path: &str) -> String {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

// =============================================================================
// Result Filtering
// =============================================================================

/// Filter a Result, logging errors at warn level.
pub fn log_filter_warn<T, E: Display>(result: Result<T, E>, context: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("{}: {}", context, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("index.ts"), ".");
        assert_eq!(parent_dir("src/index.ts"), "src");
        assert_eq!(parent_dir("src/app/App.tsx"), "src/app");
    }

    #[test]
    fn test_descendant_requires_segment_boundary() {
        assert!(is_strict_descendant("app/components", "app"));
        assert!(!is_strict_descendant("application", "app"));
        assert!(!is_strict_descendant("app", "app"));
        assert!(is_strict_descendant("app", "."));
        assert!(!is_strict_descendant(".", "."));
    }

    #[test]
    fn test_dot_segments_are_not_directories() {
        assert_eq!(ancestor_dirs("./src"), vec![".", "src"]);
        assert_eq!(ancestor_dirs("src/./app"), vec![".", "src", "src/app"]);
        assert_eq!(path_depth("./src"), 1);
    }

    #[test]
    fn test_depth() {
        assert_eq!(path_depth("."), 0);
        assert_eq!(path_depth("src"), 1);
        assert_eq!(path_depth("packages/web/src/app"), 4);
    }

    #[test]
    fn test_names() {
        assert_eq!(file_name("src/components/Button.vue"), "Button.vue");
        assert_eq!(file_stem("src/components/Button.vue"), "Button");
        assert_eq!(extension_of("src/App.TSX"), "tsx");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".eslintrc"), "");
    }

    #[test]
    fn test_log_filter() {
        let ok: Result<u8, String> = Ok(1);
        let err: Result<u8, String> = Err("boom".into());
        assert_eq!(log_filter_warn(ok, "ctx"), Some(1));
        assert_eq!(log_filter_warn(err, "ctx"), None);
    }
}
