//! React component extraction
//!
//! Candidates are the top-level function declarations, variable declarations initialised
//! with an arrow function, and class declarations of a module (`export` wrappers are
//! unwrapped). A candidate counts as a component when its body text contains `<`; that
//! JSX heuristic is the only gate.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::Node;

use super::traits::{SnapshotExtractor, create_ts_parser, get_node_text};
use crate::constants::extraction::{ANONYMOUS_CLASS, ANONYMOUS_COMPONENT};
use crate::types::{ComponentSnapshot, Framework, LensError, Result};

/// Hook calls: `useState(`, `useCustomThing(`
static HOOK_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"use[A-Z]\w*\(").expect("valid hook regex"));

/// JSX opening tags: `<div`, `<Bar`
static JSX_OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9]*)").expect("valid tag regex"));

/// JSX event attributes: `onClick=`, `onChange =`
static JSX_EVENT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"on[A-Z][A-Za-z]+\s*=").expect("valid event regex"));

/// Imperative listener registration
const ADD_EVENT_LISTENER: &str = ".addEventListener(";

const FILE_EXTENSIONS: &[&str] = &["jsx", "tsx", "js", "ts"];

pub struct ReactExtractor;

impl ReactExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotExtractor for ReactExtractor {
    fn framework(&self) -> Framework {
        Framework::React
    }

    fn supports(&self, ext: &str) -> bool {
        FILE_EXTENSIONS.contains(&ext)
    }

    fn extract(&self, path: &str, source: &str) -> Result<Vec<ComponentSnapshot>> {
        let mut parser = create_ts_parser(tree_sitter_typescript::LANGUAGE_TSX, "TSX", path)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| LensError::parse(path, "Failed to parse TSX source"))?;

        let content = source.as_bytes();
        let root = tree.root_node();
        let mut candidates = Vec::new();

        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            collect_candidates(statement, content, &mut candidates);
        }

        let snapshots = candidates
            .into_iter()
            .filter(|c| c.body.contains('<'))
            .map(|c| c.into_snapshot(path))
            .collect::<Vec<_>>();

        tracing::debug!("{}: {} react component(s)", path, snapshots.len());
        Ok(snapshots)
    }
}

/// A top-level declaration that may be a component
#[derive(Debug)]
struct Candidate<'a> {
    name: String,
    props: BTreeSet<String>,
    body: &'a str,
}

impl Candidate<'_> {
    fn into_snapshot(self, path: &str) -> ComponentSnapshot {
        let mut snapshot = ComponentSnapshot::new(self.name, Framework::React, path);
        snapshot.props = self.props;
        snapshot.hooks_or_lifecycle = hook_calls(self.body);
        snapshot.render_elements = jsx_elements(self.body);
        snapshot.event_bindings = event_bindings(self.body);
        snapshot
    }
}

fn collect_candidates<'a>(node: Node, content: &'a [u8], out: &mut Vec<Candidate<'a>>) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(c) = function_candidate(node, name_of(node, content), content) {
                out.push(c);
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(value) = declarator.child_by_field_name("value") else {
                    continue;
                };
                if value.kind() == "arrow_function"
                    && let Some(c) = function_candidate(value, name_of(declarator, content), content)
                {
                    out.push(c);
                }
            }
        }
        "class_declaration" | "abstract_class_declaration" | "class" => {
            if let Some(c) = class_candidate(node, name_of(node, content), content) {
                out.push(c);
            }
        }
        "export_statement" => {
            if let Some(declaration) = node.child_by_field_name("declaration") {
                collect_candidates(declaration, content, out);
            } else if let Some(value) = node.child_by_field_name("value") {
                match value.kind() {
                    "arrow_function" | "function_expression" | "function" => {
                        if let Some(c) = function_candidate(value, name_of(value, content), content)
                        {
                            out.push(c);
                        }
                    }
                    "class" => {
                        if let Some(c) = class_candidate(value, name_of(value, content), content) {
                            out.push(c);
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn name_of(node: Node, content: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| get_node_text(n, content).to_string())
        .filter(|n| !n.is_empty())
}

fn function_candidate<'a>(
    node: Node,
    name: Option<String>,
    content: &'a [u8],
) -> Option<Candidate<'a>> {
    let body = node.child_by_field_name("body")?;
    let mut props = BTreeSet::new();

    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            collect_param_names(param, content, &mut props);
        }
    } else if let Some(param) = node.child_by_field_name("parameter") {
        collect_param_names(param, content, &mut props);
    }

    Some(Candidate {
        name: name.unwrap_or_else(|| ANONYMOUS_COMPONENT.to_string()),
        props,
        body: get_node_text(body, content),
    })
}

fn class_candidate<'a>(
    node: Node,
    name: Option<String>,
    content: &'a [u8],
) -> Option<Candidate<'a>> {
    let body = node.child_by_field_name("body")?;
    Some(Candidate {
        name: name.unwrap_or_else(|| ANONYMOUS_CLASS.to_string()),
        props: BTreeSet::from(["props".to_string()]),
        body: get_node_text(body, content),
    })
}

/// Parameter names; destructured object parameters contribute their property names
fn collect_param_names(param: Node, content: &[u8], out: &mut BTreeSet<String>) {
    match param.kind() {
        "required_parameter" | "optional_parameter" => {
            if let Some(pattern) = param.child_by_field_name("pattern") {
                collect_param_names(pattern, content, out);
            }
        }
        "identifier" | "shorthand_property_identifier_pattern" => {
            out.insert(get_node_text(param, content).to_string());
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = param.child_by_field_name("left") {
                collect_param_names(left, content, out);
            }
        }
        "pair_pattern" => {
            if let Some(key) = param.child_by_field_name("key") {
                out.insert(get_node_text(key, content).to_string());
            }
        }
        "object_pattern" => {
            let mut cursor = param.walk();
            for child in param.named_children(&mut cursor) {
                collect_param_names(child, content, out);
            }
        }
        "rest_pattern" => {
            let mut cursor = param.walk();
            for child in param.named_children(&mut cursor) {
                collect_param_names(child, content, out);
            }
        }
        "comment" | "this" => {}
        _ => {
            let text = get_node_text(param, content).trim();
            if !text.is_empty() {
                out.insert(text.to_string());
            }
        }
    }
}

/// Hook names called in `body`, trailing `(` stripped
pub fn hook_calls(body: &str) -> BTreeSet<String> {
    HOOK_CALL
        .find_iter(body)
        .map(|m| m.as_str().trim_end_matches('(').to_string())
        .collect()
}

/// JSX opening-tag identifiers in `body`
pub fn jsx_elements(body: &str) -> BTreeSet<String> {
    JSX_OPEN_TAG
        .captures_iter(body)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// JSX event attributes (`onClick=`) plus `addEventListener` registrations
pub fn event_bindings(body: &str) -> BTreeSet<String> {
    let mut bindings: BTreeSet<String> = JSX_EVENT_ATTR
        .find_iter(body)
        .map(|m| m.as_str().chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    if body.contains(ADD_EVENT_LISTENER) {
        bindings.insert("addEventListener".to_string());
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn extract(source: &str) -> Vec<ComponentSnapshot> {
        ReactExtractor::new().extract("src/Foo.tsx", source).unwrap()
    }

    #[test]
    fn test_function_component() {
        let snapshots = extract("function Foo(props) { return <div onClick={h}><Bar/></div> }");
        assert_eq!(snapshots.len(), 1);
        let foo = &snapshots[0];
        assert_eq!(foo.component_name, "Foo");
        assert_eq!(foo.framework, Framework::React);
        assert_eq!(foo.file_path, "src/Foo.tsx");
        assert_eq!(foo.props, set(&["props"]));
        assert_eq!(foo.render_elements, set(&["div", "Bar"]));
        assert_eq!(foo.event_bindings, set(&["onClick="]));
        assert!(foo.hooks_or_lifecycle.is_empty());
    }

    #[test]
    fn test_arrow_component_with_hooks_and_destructured_props() {
        let source = r#"
import { useState, useEffect } from 'react';

export const Counter = ({ initial, label = 'n' }: Props) => {
  const [count, setCount] = useState(initial);
  useEffect(() => { document.title = label; }, [label]);
  useEffect(() => {});
  return <button onClick={() => setCount(count + 1)}>{label}</button>;
};
"#;
        let snapshots = extract(source);
        assert_eq!(snapshots.len(), 1);
        let counter = &snapshots[0];
        assert_eq!(counter.component_name, "Counter");
        assert_eq!(counter.props, set(&["initial", "label"]));
        assert_eq!(counter.hooks_or_lifecycle, set(&["useState", "useEffect"]));
        assert_eq!(counter.render_elements, set(&["button"]));
    }

    #[test]
    fn test_single_bare_parameter_arrow() {
        let snapshots = extract("const Item = item => <li>{item}</li>;");
        assert_eq!(snapshots[0].props, set(&["item"]));
        assert_eq!(snapshots[0].render_elements, set(&["li"]));
    }

    #[test]
    fn test_class_component() {
        let source = r#"
class Panel extends React.Component {
  componentDidMount() { window.addEventListener('resize', this.onResize); }
  render() { return <section><Header /></section>; }
}
"#;
        let snapshots = extract(source);
        assert_eq!(snapshots.len(), 1);
        let panel = &snapshots[0];
        assert_eq!(panel.component_name, "Panel");
        assert_eq!(panel.props, set(&["props"]));
        assert_eq!(panel.render_elements, set(&["section", "Header"]));
        assert_eq!(panel.event_bindings, set(&["addEventListener"]));
    }

    #[test]
    fn test_non_jsx_declarations_are_skipped() {
        let source = r#"
function add(a, b) { return a + b; }
const double = (x) => x * 2;
const LIMIT = 3;
"#;
        assert!(extract(source).is_empty());
    }

    #[test]
    fn test_multiple_components_in_one_file() {
        let source = r#"
export function Header() { return <h1>Title</h1>; }
export default function () { return <main />; }
"#;
        let snapshots = extract(source);
        let names: BTreeSet<_> = snapshots.iter().map(|s| s.component_name.as_str()).collect();
        assert_eq!(names, BTreeSet::from(["Header", "Anonymous"]));
    }

    #[test]
    fn test_nested_functions_are_not_candidates() {
        let source = r#"
function Outer() {
  function Inner() { return <span />; }
  return <div><Inner /></div>;
}
"#;
        let snapshots = extract(source);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].component_name, "Outer");
    }

    #[test]
    fn test_supports() {
        let extractor = ReactExtractor::new();
        assert!(extractor.supports("tsx"));
        assert!(extractor.supports("js"));
        assert!(!extractor.supports("vue"));
    }

    #[test]
    fn test_event_binding_whitespace_is_normalized() {
        assert_eq!(event_bindings("<input onChange = {f} />"), set(&["onChange="]));
    }
}
