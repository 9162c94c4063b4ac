//! Project Archetype Providers
//!
//! A provider scores how well a project matches its archetype and, when chosen, names the
//! project's source roots.
//!
//! ## Providers
//!
//! - `default`: directory-feature heuristic, always scores a small positive value
//! - `config_file`: frameworks recognised by a root config file (Next.js, Nuxt, ...)
//! - `package_json`: Create React App, recognised by its `react-scripts` dependency

mod config_file;
mod default;
mod package_json;

pub use config_file::{BUILTIN_CONFIG_FRAMEWORKS, ConfigFileProvider, ConfigFileSpec};
pub use default::DefaultHeuristicProvider;
pub use package_json::CreateReactAppProvider;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{FileTree, Result, file_name, is_strict_descendant, parent_dir};

/// Shared provider for registry and engine
pub type SharedProvider = Arc<dyn Provider>;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name, reported as the project type
    fn name(&self) -> &str;

    /// Match score in [0, 100]; 0 means "not this archetype".
    ///
    /// `dir` is the project directory on disk the tree paths are relative to.
    async fn detect(&self, dir: &Path, tree: &FileTree) -> Result<u8>;

    /// Source roots, relative to `dir`
    async fn infer_source_roots(&self, dir: &Path, tree: &FileTree) -> Result<Vec<String>>;
}

/// Directory name that never holds project sources
const IGNORED_SEGMENT: &str = "node_modules";

pub(crate) fn is_ignored(path: &str) -> bool {
    path.split('/').any(|segment| segment == IGNORED_SEGMENT)
}

/// Paths of files named one of `names`, outside ignored directories
pub(crate) fn find_files<'a>(tree: &'a FileTree, names: &[&str]) -> Vec<&'a str> {
    tree.paths()
        .filter(|p| !is_ignored(p) && names.contains(&file_name(p)))
        .collect()
}

/// Join a directory and a child name, treating `"."` as the root.
pub(crate) fn join_dir(dir: &str, child: &str) -> String {
    if dir == "." || dir.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", dir, child)
    }
}

/// True when the tree has at least one file below `dir`
pub(crate) fn has_files_under(tree: &FileTree, dir: &str) -> bool {
    tree.paths().any(|p| !is_ignored(p) && is_strict_descendant(p, dir))
}

/// First conventional subdirectory beside `config_path` that holds files, else the config's
/// own directory.
pub(crate) fn root_beside(tree: &FileTree, config_path: &str, candidates: &[&str]) -> String {
    let base = parent_dir(config_path);
    candidates
        .iter()
        .map(|sub| join_dir(base, sub))
        .find(|dir| has_files_under(tree, dir))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileFeature;

    fn tree(paths: &[&str]) -> FileTree {
        FileTree::new(paths.iter().map(|p| FileFeature::new(*p)).collect())
    }

    #[test]
    fn test_find_files_skips_node_modules() {
        let t = tree(&["package.json", "node_modules/x/package.json", "web/package.json"]);
        assert_eq!(find_files(&t, &["package.json"]), vec!["package.json", "web/package.json"]);
    }

    #[test]
    fn test_root_beside_prefers_nested_directory() {
        let t = tree(&["web/vite.config.ts", "web/src/main.ts", "web/index.html"]);
        assert_eq!(root_beside(&t, "web/vite.config.ts", &["src"]), "web/src");
        assert_eq!(root_beside(&t, "web/vite.config.ts", &["app"]), "web");

        let t = tree(&["vite.config.ts", "src/main.ts"]);
        assert_eq!(root_beside(&t, "vite.config.ts", &["src"]), "src");
    }
}
