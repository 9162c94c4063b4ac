//! File change records supplied by the diff provider

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::project::validate_relative_path;
use super::utils::extension_of;

/// One changed file of a commit or working-tree delta
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChangeRecord {
    pub relative_path: String,
    /// Unified diff text; lines prefixed with '+', '-' or ' '
    #[serde(default)]
    pub diff_text: String,
    #[serde(default)]
    pub file_content_at_commit: Option<String>,
}

impl FileChangeRecord {
    pub fn new(relative_path: impl Into<String>, diff_text: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            diff_text: diff_text.into(),
            file_content_at_commit: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.file_content_at_commit = Some(content.into());
        self
    }

    /// Check the diff-provider contract. Violations propagate to the caller.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_relative_path(&self.relative_path, "relativePath")
    }

    pub fn extension(&self) -> String {
        extension_of(&self.relative_path)
    }

    /// Content at commit, empty when the provider did not supply it
    pub fn content(&self) -> &str {
        self.file_content_at_commit.as_deref().unwrap_or("")
    }

    /// Every diff line with its kind, headers and hunk markers excluded
    pub fn diff_lines(&self) -> Vec<DiffLine<'_>> {
        parse_diff_lines(&self.diff_text)
    }

    /// Added and removed lines only
    pub fn changed_lines(&self) -> Vec<DiffLine<'_>> {
        self.diff_lines()
            .into_iter()
            .filter(|l| l.kind != DiffLineKind::Context)
            .collect()
    }

    /// Added and removed line contents joined with newlines
    pub fn changed_text(&self) -> String {
        self.changed_lines()
            .iter()
            .map(|l| l.content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Kind of a diff line, from its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    Added,
    Removed,
    Context,
}

/// One diff line with the prefix stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffLine<'a> {
    pub kind: DiffLineKind,
    /// 1-based position within the diff text
    pub line_number: usize,
    pub content: &'a str,
}

/// Split diff text into classified lines.
///
/// `+++` / `---` file headers, `@@` hunk markers, `diff`/`index` preamble lines and
/// `\ No newline at end of file` markers are skipped.
pub fn parse_diff_lines(diff_text: &str) -> Vec<DiffLine<'_>> {
    diff_text
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            if raw.starts_with("+++") || raw.starts_with("---") || raw.starts_with("@@") {
                return None;
            }
            let (kind, content) = if let Some(rest) = raw.strip_prefix('+') {
                (DiffLineKind::Added, rest)
            } else if let Some(rest) = raw.strip_prefix('-') {
                (DiffLineKind::Removed, rest)
            } else if let Some(rest) = raw.strip_prefix(' ') {
                (DiffLineKind::Context, rest)
            } else {
                return None;
            };
            Some(DiffLine {
                kind,
                line_number: idx + 1,
                content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &[&str] = &[
        "diff --git a/src/A.tsx b/src/A.tsx",
        "index 123..456 100644",
        "--- a/src/A.tsx",
        "+++ b/src/A.tsx",
        "@@ -1,3 +1,3 @@",
        " import React from 'react';",
        "-const a = 1;",
        "+const a = 2;",
        "\\ No newline at end of file",
    ];

    #[test]
    fn test_headers_are_excluded() {
        let record = FileChangeRecord::new("src/A.tsx", DIFF.join("\n"));
        let lines = record.diff_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].kind, DiffLineKind::Context);
        assert_eq!(lines[1].kind, DiffLineKind::Removed);
        assert_eq!(lines[1].content, "const a = 1;");
        assert_eq!(lines[2].kind, DiffLineKind::Added);
        assert_eq!(lines[2].line_number, 8);
    }

    #[test]
    fn test_changed_text() {
        let record = FileChangeRecord::new("src/A.tsx", DIFF.join("\n"));
        assert_eq!(record.changed_text(), "const a = 1;\nconst a = 2;");
    }

    #[test]
    fn test_validate() {
        assert!(FileChangeRecord::new("src/A.tsx", "").validate().is_ok());
        assert!(FileChangeRecord::new("", "").validate().is_err());
        assert!(FileChangeRecord::new("/etc/passwd", "").validate().is_err());
    }

    #[test]
    fn test_deserialize_without_content() {
        let record: FileChangeRecord =
            serde_json::from_str(r#"{"relativePath":"a.ts","diffText":"+x"}"#).unwrap();
        assert_eq!(record.content(), "");
        assert_eq!(record.changed_lines().len(), 1);
    }
}
