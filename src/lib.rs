//! ChangeLens - Structured Change Intelligence for Front-End Codebases
//!
//! Turns source diffs and directory trees into confidence-scored change facts.
//!
//! ## Core Features
//!
//! - **Snapshot Extraction**: props, hooks, events and rendered elements of React and Vue
//!   components
//! - **Snapshot Diffing**: typed structural changes between two snapshot sets
//! - **Change Classification**: weighted frontend (F1-F5) and backend (A1-A5) categories,
//!   plus a line-level granular analyzer
//! - **Source-Root Inference**: directory scoring and archetype providers
//!
//! ## Quick Start
//!
//! ```ignore
//! use changelens::{ExtractorRegistry, SnapshotDiffer, SourceFile};
//!
//! let registry = ExtractorRegistry::new();
//! let before = registry.extract_batch(&[SourceFile::new("src/App.tsx", old)])?;
//! let after = registry.extract_batch(&[SourceFile::new("src/App.tsx", new)])?;
//! let events = SnapshotDiffer::diff(&before, &after);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: snapshot extraction and diffing
//! - [`classifier`]: weighted change classification
//! - [`inference`]: directory aggregation and source-root inference
//! - [`config`]: layered configuration
//! - [`logging`]: tracing subscriber setup

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod inference;
pub mod logging;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, LensError, Result, ValidationError};

// Data Model
pub use types::{
    ChangeEvent, ChangeType, ClassificationContext, ClassificationResult, ComponentSnapshot,
    DirectoryFeature, FileChangeRecord, FileFeature, FileTree, Framework, LanguageType,
    ProjectInferenceResult,
};

// =============================================================================
// Component Re-exports
// =============================================================================

pub use analyzer::{ChangeSummary, ExtractorRegistry, SnapshotDiffer, SourceFile};
pub use classifier::{BackendClassifier, FrontendClassifier, GranularAnalyzer};
pub use inference::{DirectoryAggregator, InferenceEngine, ProviderRegistry};
