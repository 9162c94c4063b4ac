//! Vue single-file component extraction
//!
//! One snapshot per `.vue` file. Props come from the `props:` option (object keys or
//! array strings) and from `defineProps`; lifecycle hooks are a membership test against a
//! fixed vocabulary; events and render elements come from the template.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::sfc::{BlockSfcParser, SfcDescriptor, SfcParser};
use super::traits::{
    SnapshotExtractor, blank_comments, find_matching_bracket, top_level_entries,
};
use crate::types::{ComponentSnapshot, Framework, LensError, Result, file_stem};

/// Lifecycle vocabulary checked for presence in the script
pub const LIFECYCLE_HOOKS: &[&str] = &[
    "created",
    "mounted",
    "updated",
    "unmounted",
    "setup",
    "beforeMount",
];

/// Composition-API registrations and the vocabulary entry each one stands for
const COMPOSITION_HOOKS: &[(&str, &str)] = &[
    ("onBeforeMount", "beforeMount"),
    ("onMounted", "mounted"),
    ("onUpdated", "updated"),
    ("onUnmounted", "unmounted"),
];

static LIFECYCLE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    let words = LIFECYCLE_HOOKS
        .iter()
        .chain(COMPOSITION_HOOKS.iter().map(|(call, _)| call))
        .copied()
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({})\b", words)).expect("valid lifecycle regex")
});

/// Opening brace of the component options object
static OPTIONS_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+default\s*(?:defineComponent\s*\(\s*)?\{")
        .expect("valid options object regex")
});

static NAME_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^name\s*:\s*['"]([^'"]+)['"]"#).expect("valid name regex")
});

static PROPS_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bprops\s*:\s*").expect("valid props regex"));

static DEFINE_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdefineProps\s*").expect("valid defineProps regex"));

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid string regex"));

static ENTRY_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^['"]?([A-Za-z_$][\w$-]*)['"]?\s*\??\s*(?::|\(|$)"#).expect("valid key regex")
});

static TEMPLATE_EVENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:@|v-on:)[A-Za-z][\w.:-]*\s*=").expect("valid template event regex")
});

static TEMPLATE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][\w-]*)").expect("valid template tag regex"));

pub struct VueExtractor {
    sfc_parser: Box<dyn SfcParser>,
}

impl VueExtractor {
    pub fn new() -> Self {
        Self::with_parser(Box::new(BlockSfcParser))
    }

    /// Use a different SFC block parser
    pub fn with_parser(sfc_parser: Box<dyn SfcParser>) -> Self {
        Self { sfc_parser }
    }
}

impl Default for VueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotExtractor for VueExtractor {
    fn framework(&self) -> Framework {
        Framework::Vue
    }

    fn supports(&self, ext: &str) -> bool {
        ext == "vue"
    }

    fn extract(&self, path: &str, source: &str) -> Result<Vec<ComponentSnapshot>> {
        let descriptor = self.sfc_parser.parse(path, source)?;
        if descriptor.is_empty() {
            return Ok(Vec::new());
        }

        let script = blank_comments(&descriptor.script_text());
        let template = descriptor.template.as_deref().unwrap_or("");

        let name = component_name(&script).unwrap_or_else(|| file_stem(path).to_string());

        let mut snapshot = ComponentSnapshot::new(name, Framework::Vue, path);
        snapshot.props = props(path, &script)?;
        snapshot.hooks_or_lifecycle = lifecycle_hooks(&descriptor, &script);
        snapshot.event_bindings = template_events(template);
        snapshot.render_elements = template_tags(template);

        Ok(vec![snapshot])
    }
}

/// The `name` entry of the `export default { ... }` options object
fn component_name(script: &str) -> Option<String> {
    let open = OPTIONS_OBJECT.find(script)?.end() - 1;
    let close = find_matching_bracket(script, open)?;
    top_level_entries(&script[open + 1..close])
        .into_iter()
        .find_map(|entry| NAME_ENTRY.captures(entry).map(|c| c[1].to_string()))
}

/// Union of `props:` option keys and `defineProps` string literals / type keys
fn props(path: &str, script: &str) -> Result<BTreeSet<String>> {
    let mut props = BTreeSet::new();

    for m in PROPS_OPTION.find_iter(script) {
        let start = m.end();
        match script[start..].chars().next() {
            Some('{') => {
                let inner = bracket_inner(path, script, start, "props")?;
                props.extend(object_keys(inner));
            }
            Some('[') => {
                let inner = bracket_inner(path, script, start, "props")?;
                props.extend(string_literals(inner));
            }
            _ => {}
        }
    }

    for m in DEFINE_PROPS.find_iter(script) {
        let mut cursor = m.end();
        if script[cursor..].starts_with('<') {
            let close = find_matching_bracket(script, cursor).ok_or_else(|| {
                LensError::parse(path, "unbalanced type argument in defineProps")
            })?;
            let type_arg = script[cursor + 1..close].trim();
            if type_arg.starts_with('{') {
                let type_close = find_matching_bracket(type_arg, 0).unwrap_or(type_arg.len());
                props.extend(object_keys(&type_arg[1..type_close.max(1)]));
            }
            cursor = close + 1;
            cursor += script[cursor..].len() - script[cursor..].trim_start().len();
        }
        if script[cursor..].starts_with('(') {
            let inner = bracket_inner(path, script, cursor, "defineProps")?;
            props.extend(string_literals(inner));
        }
    }

    Ok(props)
}

fn bracket_inner<'a>(path: &str, script: &'a str, open: usize, what: &str) -> Result<&'a str> {
    let close = find_matching_bracket(script, open)
        .ok_or_else(|| LensError::parse(path, format!("unbalanced {} block", what)))?;
    Ok(&script[open + 1..close])
}

fn object_keys(inner: &str) -> Vec<String> {
    top_level_entries(inner)
        .into_iter()
        .filter(|entry| !entry.starts_with("..."))
        .filter_map(|entry| ENTRY_KEY.captures(entry).map(|c| c[1].to_string()))
        .collect()
}

fn string_literals(inner: &str) -> Vec<String> {
    STRING_LITERAL
        .captures_iter(inner)
        .map(|c| c[1].to_string())
        .collect()
}

fn lifecycle_hooks(descriptor: &SfcDescriptor, script: &str) -> BTreeSet<String> {
    let mut hooks: BTreeSet<String> = LIFECYCLE_WORD
        .captures_iter(script)
        .map(|c| {
            let word = &c[1];
            COMPOSITION_HOOKS
                .iter()
                .find(|(call, _)| *call == word)
                .map(|(_, hook)| hook.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect();
    if descriptor.has_script_setup() {
        hooks.insert("setup".to_string());
    }
    hooks
}

fn template_events(template: &str) -> BTreeSet<String> {
    TEMPLATE_EVENT
        .find_iter(template)
        .map(|m| m.as_str().chars().filter(|c| !c.is_whitespace()).collect())
        .collect()
}

fn template_tags(template: &str) -> BTreeSet<String> {
    TEMPLATE_TAG
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .collect()
}
