//! Component Analyzer Module
//!
//! Structural snapshots of UI components and the diff between two snapshot sets:
//! - React extraction on the tree-sitter TSX grammar
//! - Vue single-file component extraction
//! - Identity-keyed set diffing

pub mod differ;
pub mod extractor;

pub use differ::{ChangeSummary, SnapshotDiffer};
pub use extractor::{ExtractorRegistry, ReactExtractor, SnapshotExtractor, SourceFile, VueExtractor};
