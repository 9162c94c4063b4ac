//! Weighted Change Classifier
//!
//! One scoring engine shared by two rule-sets:
//! - Frontend (F1 to F5): hooks, markup, styling, events, config paths
//! - Backend (A1 to A5): directory conventions and exported-function naming
//!
//! The granular analyzer is the line-level variant for diffs without per-method data.
//!
//! ```rust,ignore
//! use changelens::classifier::FrontendClassifier;
//!
//! let result = FrontendClassifier::frontend().classify(&record, &ClassificationContext::default())?;
//! ```

pub mod backend;
pub mod engine;
pub mod frontend;
pub mod granular;
pub mod patterns;

pub use backend::{BackendCategory, BackendClassifier, BackendRuleSet};
pub use engine::{Category, ClassificationEngine, RuleInput, RuleSet, select_best};
pub use frontend::{FrontendCategory, FrontendClassifier, FrontendRuleSet};
pub use granular::{
    AnalysisScope, GranularAnalysis, GranularAnalyzer, GranularChange, GranularChangeKind,
};
pub use patterns::{PathPattern, WeightedPattern};
