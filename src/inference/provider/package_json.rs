use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{Provider, find_files, root_beside};
use crate::types::{FileTree, LensError, Result, log_filter_warn, parent_dir};

const MANIFEST: &str = "package.json";
const REACT_SCRIPTS: &str = "react-scripts";
const CRA_SCORE: u8 = 90;
const CRA_SOURCE_DIRS: &[&str] = &["src"];

/// The parts of a package manifest this provider reads
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Create React App, recognised by a `react-scripts` dependency
pub struct CreateReactAppProvider;

impl CreateReactAppProvider {
    pub const NAME: &'static str = "create-react-app";

    async fn read_manifest(dir: &Path, manifest_path: &str) -> Result<PackageManifest> {
        let content = tokio::fs::read_to_string(dir.join(manifest_path))
            .await
            .map_err(|e| {
                LensError::provider(Self::NAME, format!("cannot read {}: {}", manifest_path, e))
            })?;
        serde_json::from_str(&content).map_err(|e| {
            LensError::provider(Self::NAME, format!("malformed {}: {}", manifest_path, e))
        })
    }

    /// Manifests in the tree that depend on `react-scripts`.
    ///
    /// Unreadable or malformed manifests are logged and skipped; the provider fails only
    /// when every manifest in the tree failed.
    async fn cra_manifests<'a>(&self, dir: &Path, tree: &'a FileTree) -> Result<Vec<&'a str>> {
        let manifest_paths = find_files(tree, &[MANIFEST]);
        let mut matches = Vec::new();
        let mut last_error = None;
        let mut failed = 0usize;

        for manifest_path in &manifest_paths {
            let result = Self::read_manifest(dir, manifest_path).await;
            if let Err(e) = &result {
                last_error = Some(e.to_string());
            }
            match log_filter_warn(result, "Skipping package manifest") {
                Some(m) if m.depends_on(REACT_SCRIPTS) => matches.push(*manifest_path),
                Some(_) => {}
                None => failed += 1,
            }
        }

        if failed > 0 && failed == manifest_paths.len() {
            return Err(LensError::provider(
                Self::NAME,
                format!(
                    "all {} manifests failed, last: {}",
                    failed,
                    last_error.unwrap_or_default()
                ),
            ));
        }
        Ok(matches)
    }
}

#[async_trait]
impl Provider for CreateReactAppProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn detect(&self, dir: &Path, tree: &FileTree) -> Result<u8> {
        let manifests = self.cra_manifests(dir, tree).await?;
        Ok(if manifests.is_empty() { 0 } else { CRA_SCORE })
    }

    async fn infer_source_roots(&self, dir: &Path, tree: &FileTree) -> Result<Vec<String>> {
        let manifests = self.cra_manifests(dir, tree).await?;
        debug!(
            "react-scripts manifests in: {:?}",
            manifests.iter().map(|m| parent_dir(m)).collect::<Vec<_>>()
        );
        Ok(manifests
            .into_iter()
            .map(|manifest| root_beside(tree, manifest, CRA_SOURCE_DIRS))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileFeature;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn tree(paths: &[&str]) -> FileTree {
        FileTree::new(paths.iter().map(|p| FileFeature::new(*p)).collect())
    }

    #[tokio::test]
    async fn test_detects_react_scripts() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "frontend/package.json",
            r#"{"name":"app","dependencies":{"react":"^18.0.0","react-scripts":"5.0.1"}}"#,
        );
        write(temp.path(), "package.json", r#"{"name":"root","private":true}"#);
        let t = tree(&["package.json", "frontend/package.json", "frontend/src/index.js"]);

        let provider = CreateReactAppProvider;
        assert_eq!(provider.detect(temp.path(), &t).await.unwrap(), 90);
        assert_eq!(
            provider.infer_source_roots(temp.path(), &t).await.unwrap(),
            vec!["frontend/src"]
        );
    }

    #[tokio::test]
    async fn test_dev_dependency_counts() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{"devDependencies":{"react-scripts":"5.0.1"}}"#,
        );
        let t = tree(&["package.json"]);
        assert_eq!(CreateReactAppProvider.detect(temp.path(), &t).await.unwrap(), 90);
        assert_eq!(
            CreateReactAppProvider
                .infer_source_roots(temp.path(), &t)
                .await
                .unwrap(),
            vec!["."]
        );
    }

    #[tokio::test]
    async fn test_without_manifest_scores_zero() {
        let temp = TempDir::new().unwrap();
        let t = tree(&["src/index.js"]);
        assert_eq!(CreateReactAppProvider.detect(temp.path(), &t).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_broken_manifest_does_not_hide_valid_one() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "templates/package.json", r#"{ "name": {{name}} }"#);
        write(
            temp.path(),
            "web/package.json",
            r#"{"dependencies":{"react-scripts":"5.0.1"}}"#,
        );
        let t = tree(&[
            "templates/package.json",
            "web/package.json",
            "web/src/index.js",
            "missing/package.json",
        ]);

        let provider = CreateReactAppProvider;
        assert_eq!(provider.detect(temp.path(), &t).await.unwrap(), 90);
        assert_eq!(
            provider.infer_source_roots(temp.path(), &t).await.unwrap(),
            vec!["web/src"]
        );
    }

    #[tokio::test]
    async fn test_malformed_manifest_is_provider_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", "{ not json");
        let t = tree(&["package.json"]);
        let err = CreateReactAppProvider.detect(temp.path(), &t).await.unwrap_err();
        assert!(matches!(err, LensError::Provider { .. }));
        assert!(err.is_recoverable());
    }
}
