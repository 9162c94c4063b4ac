//! Global Constants
//!
//! Centralized constants for scoring and tuning.
//! All magic numbers should be defined here with documentation.

/// Directory aggregation constants
pub mod aggregation {
    /// Weight of the front-end language ratio
    pub const FILE_TYPE_WEIGHT: f64 = 0.4;

    /// Weight of the ui-signal density
    pub const CONTENT_FEATURE_WEIGHT: f64 = 0.3;

    /// Weight of distinct framework signal tokens
    pub const FRAMEWORK_SIGNAL_WEIGHT: f64 = 0.2;

    /// Weight of the absolute ui-file volume bonus
    pub const UI_COMPONENT_WEIGHT: f64 = 0.1;

    /// Score contributed by each distinct framework signal token (capped at 1.0)
    pub const FRAMEWORK_SIGNAL_STEP: f64 = 0.5;

    /// Number of ui-signal files that saturates the volume bonus
    pub const UI_COMPONENT_SATURATION: f64 = 10.0;
}

/// Source-root inference constants
pub mod inference {
    /// Maximum number of source roots returned
    pub const MAX_SOURCE_ROOTS: usize = 2;

    /// Maximum directory depth (path segments) for a fallback root
    pub const MAX_ROOT_DEPTH: usize = 4;

    /// A fallback root must score strictly above this
    pub const MIN_FRONTEND_SCORE: f64 = 0.5;

    /// Number of top-scoring directories considered by the fallback
    pub const CANDIDATE_LIMIT: usize = 10;

    /// Fixed detect() score of the default-heuristic provider
    pub const DEFAULT_PROVIDER_SCORE: u8 = 10;

    /// Upper bound of any provider score
    pub const MAX_PROVIDER_SCORE: u8 = 100;
}

/// Classification constants
pub mod classification {
    /// Upper bound of a rule score
    pub const MAX_RULE_SCORE: u32 = 100;

    /// Number of indicators quoted in a reason string
    pub const REASON_INDICATORS: usize = 3;

    /// Bonus applied when a backend file exports functions
    pub const EXPORTED_FUNCTION_BONUS: u32 = 10;

    /// Per-change score of the granular analyzer, line-level matches
    pub const GRANULAR_LINE_WEIGHT: u32 = 20;

    /// Per-change score of the granular analyzer, file-level fallback matches
    pub const GRANULAR_FILE_WEIGHT: u32 = 10;
}

/// Extraction constants
pub mod extraction {
    /// Sources larger than this are skipped by batch extraction (1MB)
    pub const MAX_SOURCE_FILE_SIZE: usize = 1_048_576;

    /// Name used for unnamed function components
    pub const ANONYMOUS_COMPONENT: &str = "Anonymous";

    /// Name used for unnamed class components
    pub const ANONYMOUS_CLASS: &str = "AnonymousClass";
}
