//! Source-Root Inference
//!
//! Decides the project archetype and its front-end source roots from a scanned file tree:
//! - Directory feature aggregation and scoring
//! - Pluggable archetype providers behind an async trait
//! - Sequential provider detection with a heuristic fallback
//!
//! ```rust,ignore
//! use changelens::inference::InferenceEngine;
//!
//! let engine = InferenceEngine::from_config(&config.inference);
//! let result = engine.infer(project_dir, &tree).await?;
//! ```

pub mod aggregator;
pub mod engine;
pub mod provider;
pub mod registry;

pub use aggregator::{DirectoryAggregator, DirectoryStats, normalize_roots};
pub use engine::{InferenceEngine, InferenceObserver, TracingObserver};
pub use provider::{
    ConfigFileProvider, ConfigFileSpec, CreateReactAppProvider, DefaultHeuristicProvider,
    Provider, SharedProvider,
};
pub use registry::ProviderRegistry;
