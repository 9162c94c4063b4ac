//! Structural Snapshot Extraction
//!
//! Per-framework extractors behind one `SnapshotExtractor` trait. The registry routes a file
//! to exactly one extractor by extension.
//!
//! ```rust,ignore
//! use changelens::analyzer::extractor::{ExtractorRegistry, SourceFile};
//!
//! let registry = ExtractorRegistry::new();
//! let snapshots = registry.extract_batch(&[SourceFile::new("src/App.tsx", content)])?;
//! ```

pub mod react;
pub mod sfc;
pub mod traits;
pub mod vue;

pub use react::ReactExtractor;
pub use sfc::{BlockSfcParser, ScriptBlock, SfcDescriptor, SfcParser};
pub use traits::{SnapshotExtractor, SourceFile, create_ts_parser, get_node_text};
pub use vue::VueExtractor;

use tracing::{debug, info, instrument};

use crate::config::ExtractionConfig;
use crate::types::{
    ComponentSnapshot, Framework, Result, extension_of, log_filter_warn, validate_relative_path,
};

/// Extension-routed set of extractors
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn SnapshotExtractor>>,
    max_file_size: usize,
}

impl ExtractorRegistry {
    /// React and Vue with default limits
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Only the frameworks enabled in `config` are registered.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut extractors: Vec<Box<dyn SnapshotExtractor>> = Vec::new();
        if config.is_enabled(Framework::React) {
            extractors.push(Box::new(ReactExtractor::new()));
        }
        if config.is_enabled(Framework::Vue) {
            extractors.push(Box::new(VueExtractor::new()));
        }
        Self {
            extractors,
            max_file_size: config.max_file_size,
        }
    }

    /// Add an extractor. Extensions it supports that are already claimed stay with the
    /// earlier registration.
    pub fn register(&mut self, extractor: Box<dyn SnapshotExtractor>) {
        self.extractors.push(extractor);
    }

    pub fn frameworks(&self) -> Vec<Framework> {
        self.extractors.iter().map(|e| e.framework()).collect()
    }

    /// The extractor responsible for a path, by its lowercase extension
    pub fn extractor_for(&self, path: &str) -> Option<&dyn SnapshotExtractor> {
        let ext = extension_of(path);
        self.extractors
            .iter()
            .find(|e| e.supports(&ext))
            .map(|e| e.as_ref())
    }

    /// Extract one file. Unknown extensions yield no snapshots; parse failures propagate.
    pub fn extract_file(&self, path: &str, source: &str) -> Result<Vec<ComponentSnapshot>> {
        match self.extractor_for(path) {
            Some(extractor) => extractor.extract(path, source),
            None => Ok(Vec::new()),
        }
    }

    /// Extract every file of a batch.
    ///
    /// A file that fails to parse contributes nothing and is logged; an invalid path is an
    /// upstream contract violation and aborts the batch.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub fn extract_batch(&self, files: &[SourceFile]) -> Result<Vec<ComponentSnapshot>> {
        let mut snapshots = Vec::new();
        let mut failed = 0usize;

        for file in files {
            validate_relative_path(&file.path, "path")?;

            if file.content.len() > self.max_file_size {
                debug!(
                    "Skipping {} ({} bytes exceeds {})",
                    file.path,
                    file.content.len(),
                    self.max_file_size
                );
                continue;
            }

            match self.extract_file(&file.path, &file.content) {
                Err(e) if !e.is_recoverable() => return Err(e),
                result => {
                    let context = format!("Extraction failed for {}", file.path);
                    match log_filter_warn(result, &context) {
                        Some(found) => snapshots.extend(found),
                        None => failed += 1,
                    }
                }
            }
        }

        info!(
            "Extracted {} snapshots from {} files ({} failed)",
            snapshots.len(),
            files.len(),
            failed
        );
        Ok(snapshots)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
