//! Single-file component block splitting
//!
//! Vue extraction only needs the raw text of the `<template>` and `<script>` blocks, so
//! the SFC parser is a trait with a lightweight block scanner as the default.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{LensError, Result};

static TEMPLATE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<template(\s[^>]*)?>").expect("valid template regex"));

static SCRIPT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<script(\s[^>]*)?>").expect("valid script regex"));

static LANG_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"lang\s*=\s*["']([\w-]+)["']"#).expect("valid lang regex"));

const TEMPLATE_CLOSE: &str = "</template>";
const SCRIPT_CLOSE: &str = "</script>";

/// One `<script>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    pub content: String,
    /// `<script setup>`
    pub setup: bool,
    pub lang: Option<String>,
}

/// Blocks of a single-file component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor {
    pub template: Option<String>,
    pub scripts: Vec<ScriptBlock>,
}

impl SfcDescriptor {
    /// All script blocks joined, in source order
    pub fn script_text(&self) -> String {
        self.scripts
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_script_setup(&self) -> bool {
        self.scripts.iter().any(|s| s.setup)
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.scripts.is_empty()
    }
}

pub trait SfcParser: Send + Sync {
    fn parse(&self, path: &str, source: &str) -> Result<SfcDescriptor>;
}

/// Block scanner: the template spans from the first `<template>` to the last
/// `</template>` (nested `<template v-if>` tags stay inside); scripts are taken in order.
pub struct BlockSfcParser;

impl SfcParser for BlockSfcParser {
    fn parse(&self, path: &str, source: &str) -> Result<SfcDescriptor> {
        let mut descriptor = SfcDescriptor::default();
        let mut script_search_from = 0;
        let mut template_span = None;

        if let Some(open) = TEMPLATE_OPEN.find(source) {
            let close = source[open.end()..]
                .rfind(TEMPLATE_CLOSE)
                .map(|idx| open.end() + idx)
                .ok_or_else(|| LensError::parse(path, "unterminated <template> block"))?;
            descriptor.template = Some(source[open.end()..close].to_string());
            template_span = Some((open.start(), close + TEMPLATE_CLOSE.len()));
        }

        while let Some(open) = SCRIPT_OPEN.find_at(source, script_search_from) {
            if let Some((start, end)) = template_span
                && open.start() > start
                && open.start() < end
            {
                script_search_from = end;
                continue;
            }

            let attrs = open.as_str();
            let close = source[open.end()..]
                .find(SCRIPT_CLOSE)
                .map(|idx| open.end() + idx)
                .ok_or_else(|| LensError::parse(path, "unterminated <script> block"))?;

            descriptor.scripts.push(ScriptBlock {
                content: source[open.end()..close].to_string(),
                setup: attrs
                    .split(|c: char| c.is_whitespace() || c == '>')
                    .any(|a| a == "setup"),
                lang: LANG_ATTR.captures(attrs).map(|c| c[1].to_string()),
            });
            script_search_from = close + SCRIPT_CLOSE.len();
        }

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_blocks() {
        let source = r#"<template>
  <div><template v-if="ok"><span /></template></div>
</template>

<script setup lang="ts">
const a = 1;
</script>
<style scoped>.a {}</style>
"#;
        let descriptor = BlockSfcParser.parse("A.vue", source).unwrap();
        let template = descriptor.template.as_deref().unwrap();
        assert!(template.contains("<template v-if=\"ok\"><span /></template>"));
        assert_eq!(descriptor.scripts.len(), 1);
        assert!(descriptor.scripts[0].setup);
        assert_eq!(descriptor.scripts[0].lang.as_deref(), Some("ts"));
        assert_eq!(descriptor.scripts[0].content.trim(), "const a = 1;");
    }

    #[test]
    fn test_two_script_blocks() {
        let source = "<script>export default { name: 'A' }</script>\n<script setup>const b = 2</script>";
        let descriptor = BlockSfcParser.parse("A.vue", source).unwrap();
        assert_eq!(descriptor.scripts.len(), 2);
        assert!(!descriptor.scripts[0].setup);
        assert!(descriptor.has_script_setup());
        assert!(descriptor.script_text().contains("const b = 2"));
        assert!(descriptor.template.is_none());
    }

    #[test]
    fn test_unterminated_blocks_are_parse_errors() {
        assert!(BlockSfcParser.parse("A.vue", "<template><div>").is_err());
        assert!(BlockSfcParser.parse("A.vue", "<script>const a = 1;").is_err());
    }

    #[test]
    fn test_empty_source() {
        assert!(BlockSfcParser.parse("A.vue", "").unwrap().is_empty());
    }
}
