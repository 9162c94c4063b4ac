//! Root inference engine
//!
//! Runs every registered provider's `detect` one after another, picks the best score
//! (first registered wins ties) and asks that provider for source roots. Without any
//! positive score the fallback provider is used.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::aggregator::normalize_roots;
use super::provider::{DefaultHeuristicProvider, SharedProvider};
use super::registry::ProviderRegistry;
use crate::config::InferenceConfig;
use crate::constants::inference::MAX_PROVIDER_SCORE;
use crate::types::{
    DetectionDetail, ErrorCategory, FileTree, LensError, ProjectInferenceResult, Result,
};

/// Receives inference progress. Injected so hosts decide where diagnostics go.
pub trait InferenceObserver: Send + Sync {
    fn provider_scored(&self, _provider: &str, _score: u8) {}

    fn provider_failed(&self, _provider: &str, _error: &LensError) {}

    fn selected(&self, _provider: &str, _roots: &[String]) {}
}

/// Forwards inference progress to `tracing`
pub struct TracingObserver;

impl InferenceObserver for TracingObserver {
    fn provider_scored(&self, provider: &str, score: u8) {
        info!(provider = %provider, score, "Provider detection");
    }

    fn provider_failed(&self, provider: &str, error: &LensError) {
        warn!(provider = %provider, "Provider failed: {}", error);
    }

    fn selected(&self, provider: &str, roots: &[String]) {
        info!(provider = %provider, "Source roots: {:?}", roots);
    }
}

pub struct InferenceEngine {
    registry: ProviderRegistry,
    fallback: SharedProvider,
    observer: Arc<dyn InferenceObserver>,
    max_source_roots: usize,
}

impl InferenceEngine {
    pub fn new(registry: ProviderRegistry, config: &InferenceConfig) -> Self {
        Self {
            registry,
            fallback: Arc::new(DefaultHeuristicProvider::new(config.clone())),
            observer: Arc::new(TracingObserver),
            max_source_roots: config.max_source_roots,
        }
    }

    /// Engine over the built-in registry filtered by `config`
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(ProviderRegistry::from_config(config), config)
    }

    pub fn with_observer(mut self, observer: Arc<dyn InferenceObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Infer the project type and source roots of the project at `dir`.
    ///
    /// Provider failures are reported to the observer and count as a score of 0. An
    /// invalid tree is rejected.
    #[instrument(skip(self, tree), fields(files = tree.len()))]
    pub async fn infer(&self, dir: &Path, tree: &FileTree) -> Result<ProjectInferenceResult> {
        tree.validate()?;

        let mut scored: Vec<(SharedProvider, u8)> = Vec::new();
        for provider in self.registry.providers() {
            match provider.detect(dir, tree).await {
                Ok(score) => {
                    let score = score.min(MAX_PROVIDER_SCORE);
                    self.observer.provider_scored(provider.name(), score);
                    if score > 0 {
                        scored.push((Arc::clone(provider), score));
                    }
                }
                Err(e) => self.recover(provider.name(), e)?,
            }
        }

        // Stable: equal scores keep registration order.
        let mut ranked = scored.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        for (provider, _) in &ranked {
            match provider.infer_source_roots(dir, tree).await {
                Ok(roots) => {
                    let details = scored
                        .iter()
                        .map(|(p, s)| DetectionDetail {
                            name: p.name().to_string(),
                            score: *s,
                        })
                        .collect();
                    return Ok(self.finish(provider.name(), roots, details));
                }
                Err(e) => {
                    self.recover(provider.name(), e)?;
                    scored.retain(|(p, _)| !Arc::ptr_eq(p, provider));
                }
            }
        }

        let roots = match self.fallback.infer_source_roots(dir, tree).await {
            Ok(roots) => roots,
            Err(e) => {
                self.recover(self.fallback.name(), e)?;
                Vec::new()
            }
        };
        Ok(self.finish(self.fallback.name(), roots, Vec::new()))
    }

    /// Report a provider error; only contract violations propagate.
    fn recover(&self, provider: &str, error: LensError) -> Result<()> {
        if error.category() == ErrorCategory::InputValidation {
            return Err(error);
        }
        self.observer.provider_failed(provider, &error);
        Ok(())
    }

    fn finish(
        &self,
        provider: &str,
        roots: Vec<String>,
        detection_details: Vec<DetectionDetail>,
    ) -> ProjectInferenceResult {
        let source_roots = normalize_roots(roots, self.max_source_roots);
        self.observer.selected(provider, &source_roots);
        ProjectInferenceResult {
            project_type: provider.to_string(),
            source_roots,
            detection_details,
        }
    }
}
