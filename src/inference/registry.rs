//! Provider registry
//!
//! Built once and handed to the inference engine. Registration order is the detection
//! order and decides ties between equal scores.

use std::sync::Arc;

use tracing::debug;

use super::provider::{
    BUILTIN_CONFIG_FRAMEWORKS, ConfigFileProvider, CreateReactAppProvider,
    DefaultHeuristicProvider, SharedProvider,
};
use crate::config::InferenceConfig;

#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: Vec<SharedProvider>,
}

impl ProviderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Config-file frameworks, then Create React App, then the default heuristic.
    pub fn builtin(config: &InferenceConfig) -> Self {
        let mut registry = Self::new();
        for spec in BUILTIN_CONFIG_FRAMEWORKS {
            registry.register(Arc::new(ConfigFileProvider::new(*spec)));
        }
        registry.register(Arc::new(CreateReactAppProvider));
        registry.register(Arc::new(DefaultHeuristicProvider::new(config.clone())));
        registry
    }

    /// Built-in providers minus `config.disabled_providers`
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::builtin(config).with_disabled(&config.disabled_providers)
    }

    pub fn register(&mut self, provider: SharedProvider) {
        self.providers.push(provider);
    }

    /// Drop providers by name
    pub fn with_disabled(mut self, names: &[String]) -> Self {
        self.providers.retain(|p| {
            let disabled = names.iter().any(|n| n == p.name());
            if disabled {
                debug!("Provider '{}' disabled", p.name());
            }
            !disabled
        });
        self
    }

    pub fn providers(&self) -> &[SharedProvider] {
        &self.providers
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
