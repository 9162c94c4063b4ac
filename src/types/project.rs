//! Project-level type definitions
//!
//! Contains the file tree handed over by the filesystem scanner and the types produced by
//! directory aggregation and source-root inference.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrorKind};
use super::utils::extension_of;

// =============================================================================
// Language Type
// =============================================================================

/// Coarse language classification of a scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageType {
    React,
    Vue,
    Ts,
    Js,
    #[default]
    Other,
}

/// Extension table, the single source of truth for `LanguageType` detection
const LANGUAGE_EXTENSIONS: &[(LanguageType, &[&str])] = &[
    (LanguageType::React, &["jsx", "tsx"]),
    (LanguageType::Vue, &["vue"]),
    (LanguageType::Ts, &["ts", "mts", "cts"]),
    (LanguageType::Js, &["js", "mjs", "cjs"]),
];

impl LanguageType {
    /// Detect from a file extension (with or without a leading dot, any case)
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_lowercase();
        LANGUAGE_EXTENSIONS
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(lang, _)| *lang)
            .unwrap_or(LanguageType::Other)
    }

    /// Front-end languages count towards a directory's file-type score
    pub fn is_frontend(&self) -> bool {
        !matches!(self, LanguageType::Other)
    }
}

// =============================================================================
// File Tree
// =============================================================================

/// Per-file features produced by the filesystem scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFeature {
    /// Relative POSIX path
    pub path: String,
    pub ext: String,
    pub language_type: LanguageType,
    #[serde(default)]
    pub framework_signal: BTreeSet<String>,
    /// Only computed by the scanner for files up to 100KB
    #[serde(default)]
    pub ui_signals: BTreeSet<String>,
}

impl FileFeature {
    /// Feature with extension and language type derived from the path
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let ext = extension_of(&path);
        Self {
            language_type: LanguageType::from_extension(&ext),
            ext,
            path,
            framework_signal: BTreeSet::new(),
            ui_signals: BTreeSet::new(),
        }
    }

    pub fn with_framework_signal(mut self, signal: impl Into<String>) -> Self {
        self.framework_signal.insert(signal.into());
        self
    }

    pub fn with_ui_signal(mut self, signal: impl Into<String>) -> Self {
        self.ui_signals.insert(signal.into());
        self
    }

    pub fn has_ui_signals(&self) -> bool {
        !self.ui_signals.is_empty()
    }
}

/// Flat list of scanned files for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTree {
    pub files: Vec<FileFeature>,
}

impl FileTree {
    pub fn new(files: Vec<FileFeature>) -> Self {
        Self { files }
    }

    /// Check the scanner contract. Violations are upstream bugs and must propagate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (idx, file) in self.files.iter().enumerate() {
            let field = format!("files[{}].path", idx);
            validate_relative_path(&file.path, &field)?;

            let declared = file.ext.trim_start_matches('.').to_lowercase();
            let actual = extension_of(&file.path);
            if declared != actual {
                return Err(ValidationError::new(
                    ValidationErrorKind::Consistency,
                    format!("extension does not match path '{}'", file.path),
                )
                .with_field(format!("files[{}].ext", idx))
                .with_comparison(actual, declared));
            }
        }
        Ok(())
    }

    /// Paths of all files, in tree order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Reject empty, absolute, backslash-separated, `.`-segmented or parent-escaping paths.
pub fn validate_relative_path(path: &str, field: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(
            ValidationError::new(ValidationErrorKind::MissingField, "path is empty")
                .with_field(field),
        );
    }
    if path.starts_with('/') || path.contains(":\\") || path.contains(":/") {
        return Err(ValidationError::new(
            ValidationErrorKind::Format,
            format!("path must be relative: '{}'", path),
        )
        .with_field(field));
    }
    if path.contains('\\') {
        return Err(ValidationError::new(
            ValidationErrorKind::Format,
            format!("path must use '/' separators: '{}'", path),
        )
        .with_field(field));
    }
    if path.split('/').any(|segment| segment == ".") {
        return Err(ValidationError::new(
            ValidationErrorKind::Format,
            format!("path must not contain '.' segments: '{}'", path),
        )
        .with_field(field));
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(ValidationError::new(
            ValidationErrorKind::Format,
            format!("path escapes the repository: '{}'", path),
        )
        .with_field(field));
    }
    Ok(())
}

// =============================================================================
// Aggregation & Inference Results
// =============================================================================

/// Aggregated front-end features of one directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryFeature {
    pub dir: String,
    pub total_files: usize,
    pub frontend_score: f64,
    pub depth: usize,
}

/// Score reported by one provider during detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionDetail {
    pub name: String,
    pub score: u8,
}

/// Outcome of a source-root inference run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInferenceResult {
    pub project_type: String,
    pub source_roots: Vec<String>,
    pub detection_details: Vec<DetectionDetail>,
}
