use serde::{Deserialize, Serialize};

use crate::types::{ComponentSnapshot, Framework, LensError, Result};

/// Source text of one file handed to extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

pub trait SnapshotExtractor: Send + Sync {
    fn framework(&self) -> Framework;

    /// Whether this extractor handles files with the given lowercase extension
    fn supports(&self, ext: &str) -> bool;

    /// Extract zero or more component snapshots from one file.
    /// A malformed source yields `LensError::Parse`.
    fn extract(&self, path: &str, source: &str) -> Result<Vec<ComponentSnapshot>>;
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
    path: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| LensError::parse(path, format!("Failed to set {} language: {}", lang_name, e)))?;
    Ok(parser)
}

/// Last byte of the `//` or `/* */` comment starting at `idx`, if one starts there.
///
/// An unterminated block comment runs to the end of the text.
fn comment_end(bytes: &[u8], idx: usize) -> Option<usize> {
    if bytes.get(idx) != Some(&b'/') {
        return None;
    }
    match bytes.get(idx + 1) {
        Some(b'/') => Some(
            bytes[idx..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|pos| idx + pos - 1)
                .unwrap_or(bytes.len() - 1),
        ),
        Some(b'*') => Some(
            bytes[idx + 2..]
                .windows(2)
                .position(|w| w == b"*/")
                .map(|pos| idx + 2 + pos + 1)
                .unwrap_or(bytes.len() - 1),
        ),
        _ => None,
    }
}

/// Copy of `text` with every comment byte except newlines replaced by a space.
///
/// Byte offsets are preserved, so indices found in the result are valid in `text`.
pub fn blank_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = bytes.to_vec();
    let mut quote: Option<u8> = None;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        if let Some(q) = quote {
            if b == b'\\' {
                idx += 1;
            } else if b == q {
                quote = None;
            }
        } else if let Some(end) = comment_end(bytes, idx) {
            for byte in &mut out[idx..=end] {
                if *byte != b'\n' {
                    *byte = b' ';
                }
            }
            idx = end;
        } else if matches!(b, b'\'' | b'"' | b'`') {
            quote = Some(b);
        }
        idx += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Index of the bracket closing the one at `open_idx`, skipping quoted strings and
/// comments.
///
/// `text[open_idx]` must be one of `{`, `[`, `(` or `<`. The `>` of an arrow (`=>`) never
/// closes an angle bracket.
pub fn find_matching_bracket(text: &str, open_idx: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open = *bytes.get(open_idx)?;
    let close = match open {
        b'{' => b'}',
        b'[' => b']',
        b'(' => b')',
        b'<' => b'>',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut idx = open_idx;
    while idx < bytes.len() {
        let b = bytes[idx];
        if let Some(q) = quote {
            if b == b'\\' {
                idx += 1;
            } else if b == q {
                quote = None;
            }
        } else if let Some(end) = comment_end(bytes, idx) {
            idx = end;
        } else if matches!(b, b'\'' | b'"' | b'`') {
            quote = Some(b);
        } else if b == open {
            depth += 1;
        } else if b == close && !(close == b'>' && idx > 0 && bytes[idx - 1] == b'=') {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
        idx += 1;
    }
    None
}

/// Split the inside of a bracketed block into its top-level entries.
///
/// Entries are separated by `,`, `;` or newlines that are not nested in another bracket,
/// string or comment. Comments are not stripped from the entries; empty entries are dropped.
pub fn top_level_entries(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut entries = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        if let Some(q) = quote {
            if b == b'\\' {
                idx += 1;
            } else if b == q {
                quote = None;
            }
        } else if let Some(end) = comment_end(bytes, idx) {
            idx = end;
        } else {
            match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'{' | b'[' | b'(' | b'<' => depth += 1,
                b'}' | b']' | b')' => depth -= 1,
                b'>' if depth > 0 && idx > 0 && bytes[idx - 1] != b'=' => depth -= 1,
                b',' | b';' | b'\n' if depth == 0 => {
                    entries.push(&inner[start..idx]);
                    start = idx + 1;
                }
                _ => {}
            }
        }
        idx += 1;
    }
    entries.push(&inner[start.min(inner.len())..]);

    entries
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matching_bracket_skips_strings() {
        let text = "{ a: '}', b: { c: 1 } } tail";
        assert_eq!(find_matching_bracket(text, 0), Some(22));
        assert_eq!(find_matching_bracket("{ open", 0), None);
        assert_eq!(find_matching_bracket("x", 0), None);
    }

    #[test]
    fn test_find_matching_bracket_skips_comments() {
        let text = "{\n  // the user's name\n  a: 1, /* } */\n}";
        assert_eq!(find_matching_bracket(text, 0), Some(text.len() - 1));
    }

    #[test]
    fn test_arrow_does_not_close_angle_bracket() {
        let text = "<{ f: () => void }>()";
        assert_eq!(find_matching_bracket(text, 0), Some(18));
    }

    #[test]
    fn test_blank_comments_keeps_offsets_and_strings() {
        let text = "a: 'http://x', // it's\nb /* c */ d";
        let blanked = blank_comments(text);
        assert_eq!(blanked.len(), text.len());
        assert_eq!(blanked, "a: 'http://x',        \nb         d");
    }

    #[test]
    fn test_top_level_entries_skip_commented_separators() {
        let entries = top_level_entries("a: 1, // x, y; z\nb: 2");
        assert_eq!(entries, vec!["a: 1", "// x, y; z", "b: 2"]);
    }

    #[test]
    fn test_top_level_entries() {
        let entries = top_level_entries(" title: String, size: { type: Number, default: 1 },\n flag ");
        assert_eq!(entries, vec!["title: String", "size: { type: Number, default: 1 }", "flag"]);
    }

    #[test]
    fn test_top_level_entries_with_arrow_defaults() {
        let entries = top_level_entries("items: { type: Array, default: () => [] }; name?: string");
        assert_eq!(entries, vec!["items: { type: Array, default: () => [] }", "name?: string"]);
    }
}
