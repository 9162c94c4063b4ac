//! Configuration Types
//!
//! All configuration structures with defaults matching the constants module.
//! Supports global (~/.config/changelens/) and project (.changelens/) level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{classification, extraction, inference};
use crate::types::{Framework, LensError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Source-root inference settings
    pub inference: InferenceConfig,

    /// Snapshot extraction settings
    pub extraction: ExtractionConfig,

    /// Change classification settings
    pub classifier: ClassifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            inference: InferenceConfig::default(),
            extraction: ExtractionConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `LensError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.inference.min_frontend_score) {
            return Err(LensError::Config(format!(
                "inference.min_frontend_score must be between 0.0 and 1.0, got {}",
                self.inference.min_frontend_score
            )));
        }

        if self.inference.max_source_roots == 0 {
            return Err(LensError::Config(
                "inference.max_source_roots must be greater than 0".to_string(),
            ));
        }

        if self.inference.candidate_limit == 0 {
            return Err(LensError::Config(
                "inference.candidate_limit must be greater than 0".to_string(),
            ));
        }

        if self.extraction.max_file_size == 0 {
            return Err(LensError::Config(
                "extraction.max_file_size must be greater than 0".to_string(),
            ));
        }

        if self.extraction.enabled_frameworks.is_empty() {
            return Err(LensError::Config(
                "extraction.enabled_frameworks must not be empty".to_string(),
            ));
        }

        if self.classifier.max_reason_indicators == 0 {
            return Err(LensError::Config(
                "classifier.max_reason_indicators must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Inference Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Maximum number of source roots in a result
    pub max_source_roots: usize,

    /// Maximum depth of a fallback root
    pub max_depth: usize,

    /// Fallback roots must score strictly above this
    pub min_frontend_score: f64,

    /// Top-N directories considered by the fallback
    pub candidate_limit: usize,

    /// Provider names excluded from the registry
    pub disabled_providers: Vec<String>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_source_roots: inference::MAX_SOURCE_ROOTS,
            max_depth: inference::MAX_ROOT_DEPTH,
            min_frontend_score: inference::MIN_FRONTEND_SCORE,
            candidate_limit: inference::CANDIDATE_LIMIT,
            disabled_providers: Vec::new(),
        }
    }
}

// =============================================================================
// Extraction Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Larger sources are skipped by batch extraction
    pub max_file_size: usize,

    /// Frameworks whose extractors are active
    pub enabled_frameworks: Vec<Framework>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_file_size: extraction::MAX_SOURCE_FILE_SIZE,
            enabled_frameworks: vec![Framework::React, Framework::Vue],
        }
    }
}

impl ExtractionConfig {
    pub fn is_enabled(&self, framework: Framework) -> bool {
        self.enabled_frameworks.contains(&framework)
    }
}

// =============================================================================
// Classifier Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of indicators quoted in the reason string
    pub max_reason_indicators: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_reason_indicators: classification::REASON_INDICATORS,
        }
    }
}
