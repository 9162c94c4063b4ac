//! Directory feature aggregation
//!
//! Every ancestor directory of every file (including the root `"."`) owns the files below
//! it. Each directory gets a front-end score from four weighted signals:
//!
//! | Signal | Weight | Value |
//! |--------|--------|-------|
//! | file type | 0.4 | front-end language files / total |
//! | content features | 0.3 | files with ui signals / total |
//! | framework signals | 0.2 | distinct tokens x 0.5, capped at 1 |
//! | ui components | 0.1 | files with ui signals / 10, capped at 1 |

use std::collections::{BTreeMap, BTreeSet};

use crate::config::InferenceConfig;
use crate::constants::aggregation::{
    CONTENT_FEATURE_WEIGHT, FILE_TYPE_WEIGHT, FRAMEWORK_SIGNAL_STEP, FRAMEWORK_SIGNAL_WEIGHT,
    UI_COMPONENT_SATURATION, UI_COMPONENT_WEIGHT,
};
use crate::types::{
    DirectoryFeature, FileTree, ancestor_dirs, is_strict_descendant, parent_dir, path_depth,
};

/// Raw counts for one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total_files: usize,
    pub frontend_files: usize,
    pub ui_signal_files: usize,
    pub framework_signals: BTreeSet<String>,
}

impl DirectoryStats {
    pub fn frontend_score(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        let total = self.total_files as f64;
        let file_type = self.frontend_files as f64 / total;
        let content_feature = self.ui_signal_files as f64 / total;
        let framework_signal =
            (self.framework_signals.len() as f64 * FRAMEWORK_SIGNAL_STEP).min(1.0);
        let ui_component = (self.ui_signal_files as f64 / UI_COMPONENT_SATURATION).min(1.0);

        FILE_TYPE_WEIGHT * file_type
            + CONTENT_FEATURE_WEIGHT * content_feature
            + FRAMEWORK_SIGNAL_WEIGHT * framework_signal
            + UI_COMPONENT_WEIGHT * ui_component
    }
}

pub struct DirectoryAggregator;

impl DirectoryAggregator {
    /// Counts per directory, keyed and ordered by directory path
    pub fn collect(tree: &FileTree) -> BTreeMap<String, DirectoryStats> {
        let mut stats: BTreeMap<String, DirectoryStats> = BTreeMap::new();
        for file in &tree.files {
            for dir in ancestor_dirs(parent_dir(&file.path)) {
                let entry = stats.entry(dir).or_default();
                entry.total_files += 1;
                if file.language_type.is_frontend() {
                    entry.frontend_files += 1;
                }
                if file.has_ui_signals() {
                    entry.ui_signal_files += 1;
                }
                entry
                    .framework_signals
                    .extend(file.framework_signal.iter().cloned());
            }
        }
        stats
    }

    /// Scored directories, sorted by path. Directories without files do not appear.
    pub fn aggregate(tree: &FileTree) -> Vec<DirectoryFeature> {
        Self::collect(tree)
            .into_iter()
            .filter(|(_, s)| s.total_files > 0)
            .map(|(dir, s)| DirectoryFeature {
                depth: path_depth(&dir),
                total_files: s.total_files,
                frontend_score: s.frontend_score(),
                dir,
            })
            .collect()
    }

    /// Pick source roots from scored directories.
    ///
    /// Top `candidate_limit` by score, then those within `max_depth` scoring above
    /// `min_frontend_score`, with ancestors winning over their descendants.
    pub fn fallback_source_roots(
        features: &[DirectoryFeature],
        config: &InferenceConfig,
    ) -> Vec<String> {
        let mut ranked: Vec<&DirectoryFeature> = features.iter().collect();
        ranked.sort_by(|a, b| b.frontend_score.total_cmp(&a.frontend_score));

        let eligible: Vec<String> = ranked
            .into_iter()
            .take(config.candidate_limit)
            .filter(|f| f.depth <= config.max_depth && f.frontend_score > config.min_frontend_score)
            .map(|f| f.dir.clone())
            .collect();

        normalize_roots(eligible, config.max_source_roots)
    }
}

/// Dedupe, drop roots lying below another root, truncate to `max`. Order is kept.
pub fn normalize_roots(roots: Vec<String>, max: usize) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(roots.len());
    for root in roots {
        if !unique.contains(&root) {
            unique.push(root);
        }
    }

    let pruned: Vec<String> = unique
        .iter()
        .filter(|root| !unique.iter().any(|other| is_strict_descendant(root, other)))
        .cloned()
        .collect();

    pruned.into_iter().take(max).collect()
}
