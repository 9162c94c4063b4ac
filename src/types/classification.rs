//! Classification result types shared by every rule-set

use serde::{Deserialize, Serialize};

/// Caller-supplied facts about a change that are not derivable from the diff text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationContext {
    /// Methods reported as changed by an external analyzer
    #[serde(default)]
    pub changed_methods: Vec<String>,
    /// Exported functions declared in the file (backend analyzers)
    #[serde(default)]
    pub exported_functions: Vec<String>,
}

impl ClassificationContext {
    pub fn with_changed_methods(mut self, methods: Vec<String>) -> Self {
        self.changed_methods = methods;
        self
    }

    pub fn with_exported_functions(mut self, functions: Vec<String>) -> Self {
        self.exported_functions = functions;
        self
    }
}

/// Category verdict for one file change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub file_path: String,
    /// Category code, e.g. `F1` or `A3`
    pub category: String,
    pub category_name: String,
    pub description: String,
    pub reason: String,
    /// Opaque bounded score in [0, 1]; not a calibrated probability
    pub confidence: f64,
    pub indicators: Vec<String>,
    pub changed_methods: Vec<String>,
}
