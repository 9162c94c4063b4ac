use std::path::Path;

use async_trait::async_trait;

use super::{Provider, find_files, root_beside};
use crate::types::{FileTree, Result};

/// Framework recognised by the presence of a config file
#[derive(Debug, Clone, Copy)]
pub struct ConfigFileSpec {
    pub name: &'static str,
    /// Exact file names of the root config
    pub config_files: &'static [&'static str],
    pub score: u8,
    /// Conventional source directories beside the config, in priority order
    pub source_dirs: &'static [&'static str],
}

/// Built-in config-file frameworks, in registration order. Ties go to the earlier entry,
/// so frameworks that also ship a bundler config come before the bundler.
pub const BUILTIN_CONFIG_FRAMEWORKS: &[ConfigFileSpec] = &[
    ConfigFileSpec {
        name: "nextjs",
        config_files: &["next.config.js", "next.config.mjs", "next.config.cjs", "next.config.ts"],
        score: 95,
        source_dirs: &["src", "app", "pages"],
    },
    ConfigFileSpec {
        name: "nuxt",
        config_files: &["nuxt.config.js", "nuxt.config.mjs", "nuxt.config.ts"],
        score: 95,
        source_dirs: &["src", "app", "pages"],
    },
    ConfigFileSpec {
        name: "angular",
        config_files: &["angular.json"],
        score: 95,
        source_dirs: &["src"],
    },
    ConfigFileSpec {
        name: "sveltekit",
        config_files: &["svelte.config.js", "svelte.config.mjs", "svelte.config.cjs", "svelte.config.ts"],
        score: 90,
        source_dirs: &["src"],
    },
    ConfigFileSpec {
        name: "vue-cli",
        config_files: &["vue.config.js", "vue.config.cjs", "vue.config.mjs"],
        score: 90,
        source_dirs: &["src"],
    },
    ConfigFileSpec {
        name: "vite",
        config_files: &[
            "vite.config.js",
            "vite.config.mjs",
            "vite.config.cjs",
            "vite.config.ts",
            "vite.config.mts",
        ],
        score: 90,
        source_dirs: &["src"],
    },
];

pub struct ConfigFileProvider {
    spec: ConfigFileSpec,
}

impl ConfigFileProvider {
    pub fn new(spec: ConfigFileSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ConfigFileSpec {
        &self.spec
    }
}

#[async_trait]
impl Provider for ConfigFileProvider {
    fn name(&self) -> &str {
        self.spec.name
    }

    async fn detect(&self, _dir: &Path, tree: &FileTree) -> Result<u8> {
        if find_files(tree, self.spec.config_files).is_empty() {
            Ok(0)
        } else {
            Ok(self.spec.score)
        }
    }

    async fn infer_source_roots(&self, _dir: &Path, tree: &FileTree) -> Result<Vec<String>> {
        Ok(find_files(tree, self.spec.config_files)
            .into_iter()
            .map(|config| root_beside(tree, config, self.spec.source_dirs))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileFeature;

    fn tree(paths: &[&str]) -> FileTree {
        FileTree::new(paths.iter().map(|p| FileFeature::new(*p)).collect())
    }

    fn provider(name: &str) -> ConfigFileProvider {
        let spec = BUILTIN_CONFIG_FRAMEWORKS
            .iter()
            .find(|s| s.name == name)
            .copied()
            .unwrap();
        ConfigFileProvider::new(spec)
    }

    #[tokio::test]
    async fn test_detects_config_anywhere() {
        let t = tree(&["apps/site/next.config.mjs", "apps/site/app/page.tsx"]);
        let next = provider("nextjs");
        assert_eq!(next.detect(Path::new("."), &t).await.unwrap(), 95);
        assert_eq!(
            next.infer_source_roots(Path::new("."), &t).await.unwrap(),
            vec!["apps/site/app"]
        );
        assert_eq!(provider("vite").detect(Path::new("."), &t).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_src_preferred_over_config_directory() {
        let t = tree(&["vite.config.ts", "index.html", "src/main.ts"]);
        let vite = provider("vite");
        assert_eq!(
            vite.infer_source_roots(Path::new("."), &t).await.unwrap(),
            vec!["src"]
        );
    }

    #[tokio::test]
    async fn test_config_directory_when_no_conventional_subdir() {
        let t = tree(&["angular.json", "projects/app/main.ts"]);
        let angular = provider("angular");
        assert_eq!(
            angular.infer_source_roots(Path::new("."), &t).await.unwrap(),
            vec!["."]
        );
    }

    #[tokio::test]
    async fn test_node_modules_config_is_ignored() {
        let t = tree(&["node_modules/pkg/vite.config.js", "src/index.js"]);
        assert_eq!(provider("vite").detect(Path::new("."), &t).await.unwrap(), 0);
    }
}
