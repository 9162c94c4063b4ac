use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::Provider;
use crate::config::InferenceConfig;
use crate::constants::inference::DEFAULT_PROVIDER_SCORE;
use crate::inference::aggregator::DirectoryAggregator;
use crate::types::{FileTree, Result};

/// Fallback provider: scores directories by their front-end features.
pub struct DefaultHeuristicProvider {
    config: InferenceConfig,
}

impl DefaultHeuristicProvider {
    pub const NAME: &'static str = "default-heuristic";

    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }
}

impl Default for DefaultHeuristicProvider {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}

#[async_trait]
impl Provider for DefaultHeuristicProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn detect(&self, _dir: &Path, _tree: &FileTree) -> Result<u8> {
        Ok(DEFAULT_PROVIDER_SCORE)
    }

    async fn infer_source_roots(&self, _dir: &Path, tree: &FileTree) -> Result<Vec<String>> {
        let features = DirectoryAggregator::aggregate(tree);
        debug!("Aggregated {} directories", features.len());
        Ok(DirectoryAggregator::fallback_source_roots(
            &features,
            &self.config,
        ))
    }
}
